//! Shell replies and their text rendering
//!
//! Rendering follows redis-cli conventions so sessions read familiarly:
//! ```text
//! OK
//! (nil)
//! (integer) 2
//! 1) "b"
//! 2) "a"
//! (error) ERR unknown command 'FLY'
//! ```

/// Reply to a shell command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Plain status line: OK, PONG
    Status(String),
    /// A value, or `(nil)` when absent
    Value(Option<String>),
    /// Integer result: (integer) 1
    Integer(i64),
    /// Numbered list, or `(empty)`
    List(Vec<String>),
    /// Multi-line free text (STATS, HELP)
    Text(String),
    /// Error line: (error) ...
    Error(String),
}

impl Reply {
    /// Render for display, without a trailing newline
    pub fn render(&self) -> String {
        match self {
            Reply::Status(s) => s.clone(),
            Reply::Value(Some(v)) => format!("\"{}\"", escape(v)),
            Reply::Value(None) => "(nil)".to_string(),
            Reply::Integer(i) => format!("(integer) {}", i),
            Reply::List(items) if items.is_empty() => "(empty)".to_string(),
            Reply::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}) \"{}\"", i + 1, escape(item)))
                .collect::<Vec<_>>()
                .join("\n"),
            Reply::Text(t) => t.trim_end().to_string(),
            Reply::Error(e) => format!("(error) {}", e),
        }
    }

    /// Check if this is an error reply
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_status() {
        assert_eq!(Reply::Status("OK".to_string()).render(), "OK");
    }

    #[test]
    fn test_render_value() {
        assert_eq!(Reply::Value(Some("2".to_string())).render(), "\"2\"");
        assert_eq!(Reply::Value(None).render(), "(nil)");
    }

    #[test]
    fn test_render_value_escapes_quotes() {
        let reply = Reply::Value(Some("say \"hi\"".to_string()));
        assert_eq!(reply.render(), r#""say \"hi\"""#);
    }

    #[test]
    fn test_render_integer() {
        assert_eq!(Reply::Integer(3).render(), "(integer) 3");
    }

    #[test]
    fn test_render_list() {
        let reply = Reply::List(vec!["b".to_string(), "a".to_string()]);
        assert_eq!(reply.render(), "1) \"b\"\n2) \"a\"");
        assert_eq!(Reply::List(vec![]).render(), "(empty)");
    }

    #[test]
    fn test_render_error() {
        let reply = Reply::Error("ERR boom".to_string());
        assert_eq!(reply.render(), "(error) ERR boom");
        assert!(reply.is_error());
    }
}
