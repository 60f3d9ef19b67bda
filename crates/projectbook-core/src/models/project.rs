use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Project fields accepted by create and update.
///
/// Field names follow the backend's column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct ProjectInput {
    /// Project name
    pub proj: String,
    pub company: String,
    /// Commission type
    pub order: String,
    /// Person responsible
    pub assign: String,
    /// Shot name
    pub shot: String,
    /// Unit price
    pub perpay: f64,
    pub count: i64,

    /// Amount received from the client
    pub inpay: f64,
    /// Client payment status
    pub inpayya: String,
    /// Contractor payment status
    pub outpayya: String,
    /// Amount paid out to contractors
    pub outpay: f64,
    /// Computed total
    pub allpay: f64,
    /// Currency of incoming payment
    pub inpayfor: String,
    /// Currency of outgoing payment
    pub outpayfor: String,

    pub note: String,
    /// Completion status
    pub tag: String,
    pub start: NaiveDateTime,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
}

/// A stored project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Project {
    pub id: i64,
    #[serde(flatten)]
    #[cfg_attr(feature = "ts", ts(flatten))]
    pub fields: ProjectInput,
}

impl Project {
    /// Income minus payout
    pub fn margin(&self) -> f64 {
        self.fields.inpay - self.fields.outpay
    }

    pub fn is_finished(&self) -> bool {
        self.fields.end.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_response() {
        let json = r#"{"id": 7, "proj": "Night Market", "company": "Lantern Films", "order": "compositing", "assign": "Wei", "shot": "NM_010", "perpay": 1200.0, "count": 3, "inpay": 3600.0, "inpayya": "paid", "outpayya": "pending", "outpay": 1500.0, "allpay": 2100.0, "inpayfor": "CNY", "outpayfor": "CNY", "note": "", "tag": "in progress", "start": "2024-03-01T09:30:00", "end": null}"#;

        let project: Project =
            serde_json::from_str(json).expect("Failed to parse project test JSON");
        assert_eq!(project.id, 7);
        assert_eq!(project.fields.shot, "NM_010");
        assert_eq!(project.fields.count, 3);
        assert_eq!(project.fields.start.to_string(), "2024-03-01 09:30:00");
        assert!(!project.is_finished());
        assert_eq!(project.margin(), 2100.0);
    }

    #[test]
    fn test_input_serializes_without_id() {
        let json = r#"{"id": 1, "proj": "p", "company": "c", "order": "o", "assign": "a", "shot": "s", "perpay": 1.0, "count": 1, "inpay": 0.0, "inpayya": "", "outpayya": "", "outpay": 0.0, "allpay": 0.0, "inpayfor": "", "outpayfor": "", "note": "", "tag": "", "start": "2024-01-01T00:00:00"}"#;
        let project: Project = serde_json::from_str(json).unwrap();

        let value = serde_json::to_value(&project.fields).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["end"], serde_json::Value::Null);
    }
}
