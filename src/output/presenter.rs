use std::io::{self, Write};

use super::config::OutputConfig;
use super::types::Envelope;

pub struct JsonPresenter { pub pretty: bool }

impl JsonPresenter {
    pub fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, env).map_err(to_io)? }
        writeln!(w)
    }
}

pub struct Emitter {
    presenter: JsonPresenter,
}

impl Emitter {
    pub fn new(cfg: OutputConfig) -> Self {
        Emitter { presenter: JsonPresenter { pretty: cfg.pretty } }
    }

    pub fn emit(&self, env: &Envelope) -> io::Result<()> {
        let mut out = io::stdout();
        self.presenter.emit(env, &mut out)?;
        out.flush()
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compact_envelope_is_one_line() {
        let env = Envelope::result("extract", &json!({"urls": 2}), None).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        JsonPresenter { pretty: false }.emit(&env, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s.lines().count(), 1);
        let v: serde_json::Value = serde_json::from_str(s.trim()).unwrap();
        assert_eq!(v["op"], "extract");
        assert_eq!(v["result"]["urls"], 2);
    }

    #[test]
    fn pretty_envelope_spans_lines() {
        let env = Envelope::plan("extract", &json!({"rows": []}), None).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        JsonPresenter { pretty: true }.emit(&env, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.lines().count() > 1);
        assert!(s.ends_with('\n'));
    }
}
