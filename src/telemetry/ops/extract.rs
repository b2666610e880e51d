use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Extract;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Config, ReadUrls, Fetch, Parse, WriteResults }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Config => "config",
        Phase::ReadUrls => "read_urls",
        Phase::Fetch => "fetch",
        Phase::Parse => "parse",
        Phase::WriteResults => "write_results",
    }}
    fn span(&self) -> Span { match self {
        Phase::Config => info_span!("config"),
        Phase::ReadUrls => info_span!("read_urls"),
        Phase::Fetch => info_span!("fetch"),
        Phase::Parse => info_span!("parse"),
        Phase::WriteResults => info_span!("write_results"),
    }}
}

impl OpMarker for Extract {
    const NAME: &'static str = "extract";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("extract") }
}
