use serde::{Deserialize, Serialize};

/// Notification kind as submitted by upstream services
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// Chat messages, system alerts and everything else non-call
    Ordinary,
    /// Incoming voice call
    VoiceCall,
    /// Incoming video call
    VideoCall,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Ordinary => "ORDINARY",
            NotificationKind::VoiceCall => "VOICE_CALL",
            NotificationKind::VideoCall => "VIDEO_CALL",
        }
    }

    pub fn is_call(&self) -> bool {
        matches!(
            self,
            NotificationKind::VoiceCall | NotificationKind::VideoCall
        )
    }

    /// Human-readable description carried in the call push payload
    pub fn call_description(&self) -> &'static str {
        match self {
            NotificationKind::VoiceCall => "Incoming voice call",
            NotificationKind::VideoCall => "Incoming video call",
            NotificationKind::Ordinary => "Notification",
        }
    }
}

/// Recipient device platform
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetPlatform {
    Android,
    Ios,
}

impl TargetPlatform {
    /// Map the legacy `device_type` column: "1" is Android, anything else iOS
    pub fn from_device_type(device_type: &str) -> Self {
        match device_type {
            "1" => TargetPlatform::Android,
            _ => TargetPlatform::Ios,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetPlatform::Android => "ANDROID",
            TargetPlatform::Ios => "IOS",
        }
    }
}

/// Chosen delivery path for a notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryPath {
    /// Standard data/alert push
    Ordinary,
    /// VoIP push that wakes the recipient's call UI immediately
    RealtimeCall,
}

impl DeliveryPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryPath::Ordinary => "ORDINARY",
            DeliveryPath::RealtimeCall => "REALTIME_CALL",
        }
    }
}

/// Call-specific fields supplied by the caller for call notifications
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallDetails {
    pub caller_name: String,
    pub room_id: String,
    pub caller_photo: Option<String>,
    pub caller_number: Option<String>,
}

/// A single outbound notification request. Created per call, consumed once
/// by the router.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub recipient_id: String,
    pub kind: NotificationKind,
    pub platform: TargetPlatform,
    /// Opaque payload for the ordinary path; forwarded untouched
    #[serde(default)]
    pub payload: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub call: Option<CallDetails>,
}

impl NotificationRequest {
    /// A call push with no call details would ring the recipient with a blank
    /// caller card; such requests are rejected at the API boundary.
    pub fn missing_call_details(&self) -> bool {
        self.kind.is_call() && self.call.is_none()
    }
}

/// Device record as read from the external store
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub recipient_id: String,
    pub platform: TargetPlatform,
    pub voip_token: Option<String>,
}

/// Metadata handed to the realtime dispatcher for a call push
#[derive(Debug, Clone)]
pub struct CallMetadata {
    pub caller_name: String,
    pub room_id: String,
    pub recipient_id: String,
    pub caller_photo: Option<String>,
    pub caller_number: Option<String>,
    pub call_description: &'static str,
}

impl CallMetadata {
    pub fn from_request(request: &NotificationRequest) -> Self {
        let details = request.call.clone().unwrap_or_default();
        Self {
            caller_name: details.caller_name,
            room_id: details.room_id,
            recipient_id: request.recipient_id.clone(),
            caller_photo: details.caller_photo,
            caller_number: details.caller_number,
            call_description: request.kind.call_description(),
        }
    }
}

/// Result of a dispatch: which path was taken and, for realtime pushes, the
/// provider-assigned message id
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub path: DeliveryPath,
    pub provider_message_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_kind_serialization() {
        let kinds = vec![
            (NotificationKind::Ordinary, "\"ORDINARY\""),
            (NotificationKind::VoiceCall, "\"VOICE_CALL\""),
            (NotificationKind::VideoCall, "\"VIDEO_CALL\""),
        ];

        for (kind, expected) in kinds {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, expected);
            let deserialized: NotificationKind = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, deserialized);
        }
    }

    #[test]
    fn test_platform_from_device_type() {
        assert_eq!(
            TargetPlatform::from_device_type("1"),
            TargetPlatform::Android
        );
        assert_eq!(TargetPlatform::from_device_type("2"), TargetPlatform::Ios);
        assert_eq!(TargetPlatform::from_device_type(""), TargetPlatform::Ios);
    }

    #[test]
    fn test_call_descriptions() {
        assert_eq!(
            NotificationKind::VoiceCall.call_description(),
            "Incoming voice call"
        );
        assert_eq!(
            NotificationKind::VideoCall.call_description(),
            "Incoming video call"
        );
    }

    #[test]
    fn test_request_deserializes_without_optional_fields() {
        let json = r#"{"recipient_id":"u1","kind":"ORDINARY","platform":"ANDROID"}"#;
        let request: NotificationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.recipient_id, "u1");
        assert!(request.payload.is_empty());
        assert!(request.call.is_none());
    }

    #[test]
    fn test_missing_call_details() {
        let mut request = NotificationRequest {
            recipient_id: "u1".to_string(),
            kind: NotificationKind::VoiceCall,
            platform: TargetPlatform::Ios,
            payload: serde_json::Map::new(),
            call: None,
        };
        assert!(request.missing_call_details());

        request.call = Some(CallDetails::default());
        assert!(!request.missing_call_details());

        request.kind = NotificationKind::Ordinary;
        request.call = None;
        assert!(!request.missing_call_details());
    }

    #[test]
    fn test_call_metadata_from_request() {
        let request = NotificationRequest {
            recipient_id: "u1".to_string(),
            kind: NotificationKind::VideoCall,
            platform: TargetPlatform::Ios,
            payload: serde_json::Map::new(),
            call: Some(CallDetails {
                caller_name: "Alice".to_string(),
                room_id: "room-42".to_string(),
                caller_photo: Some("https://cdn.example.com/a.jpg".to_string()),
                caller_number: Some("+15550100".to_string()),
            }),
        };

        let metadata = CallMetadata::from_request(&request);
        assert_eq!(metadata.caller_name, "Alice");
        assert_eq!(metadata.room_id, "room-42");
        assert_eq!(metadata.recipient_id, "u1");
        assert_eq!(metadata.call_description, "Incoming video call");
    }
}
