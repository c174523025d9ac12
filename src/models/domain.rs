use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building geographic values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// A validated point on the earth's surface, in degrees
///
/// Latitude is within [-90, 90] and longitude within [-180, 180]. The only
/// way to obtain one is through [`Coordinate::new`] (or deserialization, which
/// goes through it), so downstream distance code never sees NaN or
/// out-of-range components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeoError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        let latitude = ensure_within(latitude, 90.0, "latitude")?;
        let longitude = ensure_within(longitude, 180.0, "longitude")?;
        Ok(Self { latitude, longitude })
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

fn ensure_within(value: f64, bound: f64, label: &str) -> Result<f64, GeoError> {
    if !value.is_finite() {
        return Err(GeoError::InvalidArgument(format!(
            "{} must be a finite number, got {}",
            label, value
        )));
    }
    if value < -bound || value > bound {
        return Err(GeoError::InvalidArgument(format!(
            "{} must be between {} and {} degrees, got {}",
            label, -bound, bound, value
        )));
    }
    Ok(value)
}

/// Anything that may carry a position
///
/// Items returning `None` are never spatial matches.
pub trait GeoTagged {
    fn coordinate(&self) -> Option<Coordinate>;
}

impl GeoTagged for Coordinate {
    fn coordinate(&self) -> Option<Coordinate> {
        Some(*self)
    }
}

impl GeoTagged for Option<Coordinate> {
    fn coordinate(&self) -> Option<Coordinate> {
        *self
    }
}

impl<T: GeoTagged + ?Sized> GeoTagged for &T {
    fn coordinate(&self) -> Option<Coordinate> {
        (**self).coordinate()
    }
}

/// Place attached to a memory, as stored in the document database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Location {
    /// Validate the stored components
    pub fn coordinate(&self) -> Result<Coordinate, GeoError> {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl From<Coordinate> for Location {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
            name: None,
        }
    }
}

/// A shared memory: a dated post with photos, tags and an optional place
///
/// Store documents carry both the database's `$`-prefixed system attributes
/// and the app's own `id`/`createdAt`/`updatedAt` attributes, so each gets
/// its own field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    #[serde(rename = "$id", default)]
    pub id: String,
    /// Id attribute written by the app, independent of the document id
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "albumId", default)]
    pub album_id: Option<String>,
    #[serde(rename = "imageUrls", default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(rename = "createdAt", default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, deserialize_with = "timestamp::lenient")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "$createdAt",
        default,
        deserialize_with = "timestamp::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub document_created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "$updatedAt",
        default,
        deserialize_with = "timestamp::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub document_updated_at: Option<DateTime<Utc>>,
}

mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// RFC 3339, or a zone-less ISO timestamp read as UTC. Anything else is
    /// dropped rather than failing the whole document.
    pub fn lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(Value::as_str).and_then(parse))
    }

    fn parse(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|t| t.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }
}

impl GeoTagged for Memory {
    /// Stored locations with invalid components count as untagged
    fn coordinate(&self) -> Option<Coordinate> {
        self.location.as_ref().and_then(|l| l.coordinate().ok())
    }
}

/// A memory that passed the proximity test, with its distance from the center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyMemory {
    #[serde(flatten)]
    pub memory: Memory,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

/// Geospatial bounding box
///
/// Longitudes may run past ±180 when the box straddles the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// How nearby results are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrder {
    /// Order in which the store returned the memories
    #[default]
    Encounter,
    /// Closest first; ties keep store order
    Distance,
}

/// Parameters of a proximity search
#[derive(Debug, Clone, Copy)]
pub struct NearbyQuery {
    pub center: Coordinate,
    pub radius_km: f64,
    pub limit: Option<usize>,
    pub order: ResultOrder,
}

impl NearbyQuery {
    pub fn new(center: Coordinate, radius_km: f64) -> Self {
        Self {
            center,
            radius_km,
            limit: None,
            order: ResultOrder::Encounter,
        }
    }
}
