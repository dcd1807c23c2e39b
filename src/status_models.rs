// View models for the subway service-status API, and the normalization that
// turns the parsed upstream feed into them.
//
// Feed shape (MTA serviceStatus):
//   <service>
//     <timestamp>..</timestamp>
//     <subway>
//       <line><name/><status/><text/><Date/><Time/></line>
//       ...
//     </subway>
//   </service>

use serde::{Deserialize, Serialize};

use crate::feed_tree::FeedNode;

// ============================================================================
// Data Structures
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Sample,
    #[default]
    #[serde(other)]
    Live,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LineStatus {
    pub name: String, // Raw route list, e.g. "A,C,E"
    pub status: String,
    pub last_updated: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub lines: Vec<LineStatus>,
}

// ============================================================================
// Normalization
// ============================================================================

const TIMESTAMP_KEYS: &[&str] = &["timestamp", "TimeStamp", "timeStamp"];
const LINE_TIME_KEYS: &[&str] = &["Time", "time", "TimeStamp"];
const UNKNOWN_LINE: &str = "Unknown line";
const UNKNOWN_STATUS: &str = "UNKNOWN";

/// Maps a parsed feed into a report tagged with `source`. Never fails: every
/// missing piece of the feed has a default.
pub fn normalize_service_status(tree: &FeedNode, source: Source) -> StatusReport {
    let service = tree
        .get("service")
        .filter(|service| !service.is_empty())
        .unwrap_or(tree);
    let timestamp = service.first_text(TIMESTAMP_KEYS).unwrap_or_default();

    let lines = service
        .get("subway")
        .and_then(|subway| subway.get("line"))
        .map(FeedNode::as_slice)
        .unwrap_or_default();

    StatusReport {
        source,
        updated_at: timestamp.to_string(),
        lines: lines
            .iter()
            .filter(|line| !line.is_empty())
            .map(|line| LineStatus::from_feed(line, timestamp))
            .collect(),
    }
}

impl LineStatus {
    fn from_feed(line: &FeedNode, report_timestamp: &str) -> Self {
        let last_updated = match (line.text("Date"), line.first_text(LINE_TIME_KEYS)) {
            (Some(date), Some(time)) => format!("{} {}", date, time),
            _ => report_timestamp.to_string(),
        };

        LineStatus {
            name: line.text("name").unwrap_or(UNKNOWN_LINE).trim().to_string(),
            status: line.text("status").unwrap_or(UNKNOWN_STATUS).to_uppercase(),
            last_updated,
            description: line
                .get("text")
                .map(FeedNode::flatten_text)
                .unwrap_or_default(),
        }
    }
}
