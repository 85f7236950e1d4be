use crate::errors::AppError;
use serde::{Deserialize, Serialize};

/// Forwarder-side transfer parameters nested under `XFER_PARAMS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct XferParams {
    pub raft_list: String,
    pub raft_ccd_list: Vec<String>,
    pub at_fwdr: String,
}

/// One message of the image-transfer workflow. The wire format is a flat
/// YAML mapping discriminated by `MSG_TYPE`; which other fields are present
/// is determined by the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "MSG_TYPE",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "SCREAMING_SNAKE_CASE"
)]
pub enum Message {
    /// Foreman/forwarder association announcement.
    Associated {
        association_key: String,
        reply_queue: String,
        ack_id: String,
    },
    /// Transfer-parameter announcement for one image readout.
    AtFwdrXferParams {
        reply_queue: String,
        image_id: String,
        ack_id: String,
        target_location: String,
        session_id: String,
        job_num: String,
        xfer_params: XferParams,
        locations: Vec<String>,
    },
    /// The header file for an image is available over HTTP.
    AtFwdrHeaderReady {
        ack_id: String,
        filename: String,
        image_id: String,
        reply_queue: String,
    },
    /// Readout of an image has finished.
    AtFwdrEndReadout {
        reply_queue: String,
        image_id: String,
        ack_id: String,
    },
    /// Trigger a scan of day `DAY`.
    Scan { day: u32 },
    /// Reply confirming an association.
    AssociatedAck { association_key: String },
    /// Reply announcing a finished file transfer.
    FileTransferCompleted {
        filename: String,
        session_id: String,
        job_num: String,
        reply_queue: String,
    },
}

impl Message {
    pub fn msg_type(&self) -> &'static str {
        match self {
            Message::Associated { .. } => "ASSOCIATED",
            Message::AtFwdrXferParams { .. } => "AT_FWDR_XFER_PARAMS",
            Message::AtFwdrHeaderReady { .. } => "AT_FWDR_HEADER_READY",
            Message::AtFwdrEndReadout { .. } => "AT_FWDR_END_READOUT",
            Message::Scan { .. } => "SCAN",
            Message::AssociatedAck { .. } => "ASSOCIATED_ACK",
            Message::FileTransferCompleted { .. } => "FILE_TRANSFER_COMPLETED",
        }
    }

    /// Builds `AT_FWDR_HEADER_READY` with `FILENAME` pointing at
    /// `<base_url>/<image_id>.header` on the header service.
    pub fn header_ready(
        base_url: &str,
        image_id: &str,
        ack_id: &str,
        reply_queue: &str,
    ) -> Message {
        Message::AtFwdrHeaderReady {
            ack_id: ack_id.to_string(),
            filename: format!("{}/{}.header", base_url.trim_end_matches('/'), image_id),
            image_id: image_id.to_string(),
            reply_queue: reply_queue.to_string(),
        }
    }

    pub fn to_yaml(&self) -> Result<String, AppError> {
        Ok(serde_yaml_bw::to_string(self)?)
    }

    pub fn from_yaml(body: &str) -> Result<Message, AppError> {
        Ok(serde_yaml_bw::from_str(body)?)
    }
}

/// Forwarder registration record published at startup by the real
/// forwarder. Lowercase keys on the wire, unlike the workflow messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwarderInfo {
    pub hostname: String,
    pub ip_address: String,
    pub consume_queue: String,
}

/// The fixed sequence the publisher utility sends to drive one simulated
/// readout of `image_id`: association, transfer parameters, header ready,
/// end of readout, and a scan trigger, in that order.
pub fn readout_sequence(image_id: &str) -> Vec<Message> {
    vec![
        Message::Associated {
            association_key: "atarchiver_association".to_string(),
            reply_queue: "atarchiver_ack_publish".to_string(),
            ack_id: "ack_id".to_string(),
        },
        Message::AtFwdrXferParams {
            reply_queue: "at_foreman_ack_publish".to_string(),
            image_id: image_id.to_string(),
            ack_id: "ack_100".to_string(),
            target_location: "ARC@141.142.238.15:/tmp".to_string(),
            session_id: "Session_100".to_string(),
            job_num: "job_100".to_string(),
            xfer_params: XferParams {
                raft_list: "00".to_string(),
                raft_ccd_list: vec![
                    "22/0".to_string(),
                    "22/1".to_string(),
                    "22/2".to_string(),
                ],
                at_fwdr: "f99".to_string(),
            },
            locations: vec![
                "22/0".to_string(),
                "22/1".to_string(),
                "22/2".to_string(),
            ],
        },
        Message::header_ready(
            "http://localhost:8000",
            image_id,
            "0",
            "at_foreman_ack_publish",
        ),
        Message::AtFwdrEndReadout {
            reply_queue: "at_foreman_ack_publish".to_string(),
            image_id: image_id.to_string(),
            ack_id: "ack_100".to_string(),
        },
        Message::Scan { day: 0 },
    ]
}
