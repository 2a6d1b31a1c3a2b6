//! Command handler for the shell

use boundlru::SharedLruCache;
use serde::Serialize;

use crate::command::{Command, HELP};
use crate::reply::Reply;

/// Counters reported by STATS
#[derive(Debug, Serialize)]
struct StatsReport {
    len: usize,
    capacity: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
    inserts: u64,
    hit_ratio: f64,
}

pub struct CommandHandler {
    cache: SharedLruCache<String, String>,
    json_stats: bool,
}

impl CommandHandler {
    pub fn new(cache: SharedLruCache<String, String>, json_stats: bool) -> Self {
        Self { cache, json_stats }
    }

    /// Run one command
    ///
    /// Returns `None` for QUIT, which ends the session.
    pub fn handle(&self, cmd: Command) -> Option<Reply> {
        let reply = match cmd {
            Command::Put { key, value } => self.handle_put(key, value),
            Command::Get(key) => Reply::Value(self.cache.get(&key)),
            Command::Peek(key) => Reply::Value(self.cache.peek(&key)),
            Command::Del(key) => Reply::Integer(self.cache.remove(&key).is_some() as i64),
            Command::Exists(key) => Reply::Integer(self.cache.contains(&key) as i64),
            Command::Len => Reply::Integer(self.cache.len() as i64),
            Command::Keys => Reply::List(self.cache.keys()),
            Command::Clear => {
                self.cache.clear();
                Reply::Status("OK".to_string())
            }
            Command::Stats => self.handle_stats(),
            Command::Ping => Reply::Status("PONG".to_string()),
            Command::Help => Reply::Text(HELP.join("\n")),
            Command::Quit => return None,
        };
        Some(reply)
    }

    fn handle_put(&self, key: String, value: String) -> Reply {
        match self.cache.put(key, value) {
            Some((evicted, _)) => Reply::Status(format!("OK (evicted {})", evicted)),
            None => Reply::Status("OK".to_string()),
        }
    }

    fn handle_stats(&self) -> Reply {
        let snap = self.cache.stats().snapshot();
        let report = StatsReport {
            len: self.cache.len(),
            capacity: self.cache.capacity(),
            hits: snap.hits,
            misses: snap.misses,
            evictions: snap.evictions,
            inserts: snap.inserts,
            hit_ratio: snap.hit_ratio,
        };

        if self.json_stats {
            return match serde_json::to_string(&report) {
                Ok(json) => Reply::Text(json),
                Err(e) => Reply::Error(format!("ERR {}", e)),
            };
        }

        let info = format!(
            "# Cache\n\
             size:{}\n\
             capacity:{}\n\
             \n\
             # Stats\n\
             hits:{}\n\
             misses:{}\n\
             evictions:{}\n\
             inserts:{}\n\
             hit_ratio:{:.2}\n",
            report.len,
            report.capacity,
            report.hits,
            report.misses,
            report.evictions,
            report.inserts,
            report.hit_ratio,
        );
        Reply::Text(info)
    }
}
