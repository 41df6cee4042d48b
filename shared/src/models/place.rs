//! Place Model

use serde::{Deserialize, Serialize};

use crate::models::photo::Photo;
use crate::util::now_iso;

/// Soft cap on the one-line note, enforced at input time only.
/// The write path never re-validates, so longer notes written by other
/// clients round-trip untouched.
pub const NOTE_MAX_LEN: usize = 140;

/// Upper bound of the star rating scale (0..=5).
pub const RATING_MAX: u8 = 5;

/// Visit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Want,
    Booked,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Want => "want",
            Status::Booked => "booked",
            Status::Done => "done",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Symbolic price tier
///
/// Stored as the literal yen strings (`""`, `"¥"`..`"¥¥¥¥"`), which is
/// the shape older records already carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PriceRange {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "¥")]
    Tier1,
    #[serde(rename = "¥¥")]
    Tier2,
    #[serde(rename = "¥¥¥")]
    Tier3,
    #[serde(rename = "¥¥¥¥")]
    Tier4,
}

impl PriceRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Unset => "",
            PriceRange::Tier1 => "¥",
            PriceRange::Tier2 => "¥¥",
            PriceRange::Tier3 => "¥¥¥",
            PriceRange::Tier4 => "¥¥¥¥",
        }
    }
}

/// Opaque ordering token assigned by the document store.
///
/// Written under `createdAtTS`/`updatedAtTS`, separate from the
/// human-readable strings. `Request` serializes to JSON null and is
/// replaced by the store's own clock at write time; `Assigned` is what
/// comes back in snapshots. Never read by this system; reserved for
/// future server-side ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerTimestamp {
    Assigned(i64),
    Request,
}

impl ServerTimestamp {
    pub fn is_request(&self) -> bool {
        matches!(self, ServerTimestamp::Request)
    }
}

/// One restaurant entry, as decoded from a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Store-assigned identifier; stable for the entity's lifetime
    pub id: String,
    pub name: String,
    pub area: Option<String>,
    pub genre: Option<String>,
    pub price_range: PriceRange,
    pub url: Option<String>,
    pub status: Status,
    /// 0..=5
    pub rating: Option<u8>,
    pub note: Option<String>,
    /// Most-recent-first, at most [`MAX_PHOTOS`](crate::models::photo::MAX_PHOTOS)
    pub photos: Vec<Photo>,
    /// Immutable after creation
    pub created_at: String,
    /// Rewritten on every mutation
    pub updated_at: String,
}

impl Place {
    /// Combine a store document with its id into the in-memory entity,
    /// substituting the current local time for absent display timestamps.
    pub fn from_doc(id: impl Into<String>, doc: PlaceDoc) -> Self {
        Self {
            id: id.into(),
            name: doc.name,
            area: doc.area,
            genre: doc.genre,
            price_range: doc.price_range,
            url: doc.url,
            status: doc.status,
            rating: doc.rating,
            note: doc.note,
            photos: doc.photos,
            created_at: doc.created_at.unwrap_or_else(now_iso),
            updated_at: doc.updated_at.unwrap_or_else(now_iso),
        }
    }
}

/// Persisted record, one per place.
///
/// Doubles as the full create payload and the defensive decode target:
/// every field a newer writer may omit (or an older writer never wrote)
/// carries `#[serde(default)]`. `name` and `status` are required: a
/// record missing them is malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDoc {
    pub name: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub price_range: PriceRange,
    #[serde(default)]
    pub url: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(rename = "createdAtTS", default, skip_serializing_if = "Option::is_none")]
    pub created_at_ts: Option<ServerTimestamp>,
    #[serde(rename = "updatedAtTS", default, skip_serializing_if = "Option::is_none")]
    pub updated_at_ts: Option<ServerTimestamp>,
}

/// Editor payload for create and update.
///
/// Excludes identity and timestamps; `photos` is honored on create only
/// (updates never touch the photo list).
#[derive(Debug, Clone, Default)]
pub struct PlaceDraft {
    pub name: String,
    pub area: Option<String>,
    pub genre: Option<String>,
    pub price_range: PriceRange,
    pub url: Option<String>,
    pub status: Status,
    pub rating: Option<u8>,
    pub note: Option<String>,
    pub photos: Option<Vec<Photo>>,
}

impl PlaceDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// General update payload: the full draft field set plus a fresh
/// `updatedAt` string. Serializes every field, nulls included, so a
/// cleared optional actually clears the stored value. `createdAt`,
/// `photos` and the server tokens are deliberately absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceUpdate {
    pub name: String,
    pub area: Option<String>,
    pub genre: Option<String>,
    pub price_range: PriceRange,
    pub url: Option<String>,
    pub status: Status,
    pub rating: Option<u8>,
    pub note: Option<String>,
    pub updated_at: String,
}

/// Narrow patch for status toggles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPatch {
    pub status: Status,
    pub updated_at: String,
    #[serde(rename = "updatedAtTS")]
    pub updated_at_ts: ServerTimestamp,
}

/// Narrow patch rewriting the photo list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotosPatch {
    pub photos: Vec<Photo>,
    pub updated_at: String,
    #[serde(rename = "updatedAtTS")]
    pub updated_at_ts: ServerTimestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn doc_with_only_required_fields_decodes_with_defaults() {
        let doc: PlaceDoc =
            serde_json::from_value(json!({ "name": "Ramen Ichi", "status": "want" })).unwrap();
        assert_eq!(doc.price_range, PriceRange::Unset);
        assert!(doc.photos.is_empty());
        assert!(doc.created_at.is_none());
        assert!(doc.created_at_ts.is_none());

        let place = Place::from_doc("p1", doc);
        assert_eq!(place.id, "p1");
        assert!(!place.created_at.is_empty());
    }

    #[test]
    fn doc_missing_status_is_malformed() {
        let res: Result<PlaceDoc, _> = serde_json::from_value(json!({ "name": "Ramen Ichi" }));
        assert!(res.is_err());
    }

    #[test]
    fn price_range_uses_yen_strings_on_the_wire() {
        assert_eq!(serde_json::to_value(PriceRange::Tier2).unwrap(), json!("¥¥"));
        assert_eq!(
            serde_json::from_value::<PriceRange>(json!("")).unwrap(),
            PriceRange::Unset
        );
    }

    #[test]
    fn server_timestamp_request_is_null_on_the_wire() {
        assert_eq!(
            serde_json::to_value(ServerTimestamp::Request).unwrap(),
            serde_json::Value::Null
        );
        let assigned = serde_json::from_value::<ServerTimestamp>(json!(42)).unwrap();
        assert_eq!(assigned, ServerTimestamp::Assigned(42));
        assert!(!assigned.is_request());
        assert!(ServerTimestamp::Request.is_request());
    }

    #[test]
    fn update_payload_serializes_cleared_fields_as_null() {
        let update = PlaceUpdate {
            name: "Sushi Tengoku".into(),
            area: None,
            genre: Some("sushi".into()),
            price_range: PriceRange::Tier3,
            url: None,
            status: Status::Booked,
            rating: Some(4),
            note: None,
            updated_at: "2025-03-14T09:26:53.589Z".into(),
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["area"], serde_json::Value::Null);
        assert_eq!(value["priceRange"], json!("¥¥¥"));
        assert_eq!(value["updatedAt"], json!("2025-03-14T09:26:53.589Z"));
        assert!(value.get("photos").is_none());
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn status_patch_touches_only_status_fields() {
        let patch = StatusPatch {
            status: Status::Done,
            updated_at: now_iso(),
            updated_at_ts: ServerTimestamp::Request,
        };
        let value = serde_json::to_value(&patch).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(value["status"], json!("done"));
        assert_eq!(value["updatedAtTS"], serde_json::Value::Null);
    }
}
