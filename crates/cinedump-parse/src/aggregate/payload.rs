//! Record payloads and how each one folds successive lines.

use std::fmt;

use cinedump_core::errors::ParseError;
use serde::{Deserialize, Serialize};

/// A payload built from the trailing values of one or more lines.
pub trait RecordPayload: Sized {
    /// Start a payload from the first line of an entity.
    fn from_values(values: &[String], line_no: usize) -> Result<Self, ParseError>;

    /// Fold a further line of the same entity into the payload.
    fn absorb(&mut self, values: &[String], line_no: usize) -> Result<(), ParseError>;
}

fn value_at<'a>(
    values: &'a [String],
    index: usize,
    field: &'static str,
    line_no: usize,
) -> Result<&'a str, ParseError> {
    values
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| ParseError::InvalidField {
            field,
            value: String::new(),
            line_no,
        })
}

/// Single free-text value per line: genres, keywords, languages, locations.
impl RecordPayload for Vec<String> {
    fn from_values(values: &[String], line_no: usize) -> Result<Self, ParseError> {
        let mut out = Vec::with_capacity(2);
        out.absorb(values, line_no)?;
        Ok(out)
    }

    fn absorb(&mut self, values: &[String], line_no: usize) -> Result<(), ParseError> {
        self.push(value_at(values, 0, "value", line_no)?.to_string());
        Ok(())
    }
}

/// Running times in minutes.
impl RecordPayload for Vec<u32> {
    fn from_values(values: &[String], line_no: usize) -> Result<Self, ParseError> {
        let mut out = Vec::with_capacity(1);
        out.absorb(values, line_no)?;
        Ok(out)
    }

    fn absorb(&mut self, values: &[String], line_no: usize) -> Result<(), ParseError> {
        let raw = value_at(values, 0, "running time", line_no)?;
        let minutes = raw.parse::<u32>().map_err(|_| ParseError::InvalidField {
            field: "running time",
            value: raw.to_string(),
            line_no,
        })?;
        self.push(minutes);
        Ok(())
    }
}

/// Average rating in tenths: `7.8` is stored as 78.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rating(u16);

impl Rating {
    pub fn from_tenths(tenths: u16) -> Self {
        Self(tenths)
    }

    /// Parse the `d.d` / `dd.d` notation of the ratings list.
    pub fn parse(text: &str) -> Option<Self> {
        let (whole, frac) = text.split_once('.')?;
        if whole.is_empty() || whole.len() > 2 || frac.len() != 1 {
            return None;
        }
        if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        let whole: u16 = whole.parse().ok()?;
        let frac: u16 = frac.parse().ok()?;
        Some(Self(whole * 10 + frac))
    }

    pub fn tenths(&self) -> u16 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Vote count and average rating of one ratings line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingPayload {
    pub votes: u32,
    pub rating: Rating,
}

/// A run of equal keys keeps the last line's votes and rating.
impl RecordPayload for RatingPayload {
    fn from_values(values: &[String], line_no: usize) -> Result<Self, ParseError> {
        let votes_raw = value_at(values, 0, "votes", line_no)?;
        let votes = votes_raw.parse::<u32>().map_err(|_| ParseError::InvalidField {
            field: "votes",
            value: votes_raw.to_string(),
            line_no,
        })?;
        let rating_raw = value_at(values, 1, "rating", line_no)?;
        let rating = Rating::parse(rating_raw).ok_or_else(|| ParseError::InvalidField {
            field: "rating",
            value: rating_raw.to_string(),
            line_no,
        })?;
        Ok(Self { votes, rating })
    }

    fn absorb(&mut self, values: &[String], line_no: usize) -> Result<(), ParseError> {
        *self = Self::from_values(values, line_no)?;
        Ok(())
    }
}

/// Technical list slots, one per sub-key tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalSpecs {
    /// `CAM`
    pub camera: Vec<String>,
    /// `MET`
    pub film_length: Vec<String>,
    /// `OFM`
    pub original_format: Vec<String>,
    /// `PFM`
    pub printed_format: Vec<String>,
    /// `RAT`
    pub aspect_ratio: Vec<String>,
    /// `PCS`
    pub process: Vec<String>,
    /// `LAB`
    pub laboratory: Vec<String>,
}

impl TechnicalSpecs {
    pub fn slot(&self, tag: &str) -> Option<&[String]> {
        let slot = match tag {
            "CAM" => &self.camera,
            "MET" => &self.film_length,
            "OFM" => &self.original_format,
            "PFM" => &self.printed_format,
            "RAT" => &self.aspect_ratio,
            "PCS" => &self.process,
            "LAB" => &self.laboratory,
            _ => return None,
        };
        Some(slot)
    }

    fn slot_mut(&mut self, tag: &str) -> Option<&mut Vec<String>> {
        let slot = match tag {
            "CAM" => &mut self.camera,
            "MET" => &mut self.film_length,
            "OFM" => &mut self.original_format,
            "PFM" => &mut self.printed_format,
            "RAT" => &mut self.aspect_ratio,
            "PCS" => &mut self.process,
            "LAB" => &mut self.laboratory,
            _ => return None,
        };
        Some(slot)
    }
}

impl RecordPayload for TechnicalSpecs {
    fn from_values(values: &[String], line_no: usize) -> Result<Self, ParseError> {
        let mut specs = Self::default();
        specs.absorb(values, line_no)?;
        Ok(specs)
    }

    fn absorb(&mut self, values: &[String], line_no: usize) -> Result<(), ParseError> {
        let tag = value_at(values, 0, "tag", line_no)?;
        let value = value_at(values, 1, "value", line_no)?;
        self.slot_mut(tag)
            .ok_or_else(|| ParseError::UnknownSubKey {
                tag: tag.to_string(),
                line_no,
            })?
            .push(value.to_string());
        Ok(())
    }
}

/// Business list slots, one per sub-key tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessData {
    /// `BT`
    pub budget: Vec<String>,
    /// `GR`
    pub gross: Vec<String>,
    /// `OW`
    pub opening_weekend: Vec<String>,
    /// `RT`
    pub rentals: Vec<String>,
    /// `AD`
    pub admissions: Vec<String>,
    /// `SD`
    pub shooting_dates: Vec<String>,
    /// `PD`
    pub production_dates: Vec<String>,
    /// `ST`
    pub studios: Vec<String>,
    /// `CP`
    pub copyright_holders: Vec<String>,
    /// `WG`
    pub weekend_gross: Vec<String>,
}

impl BusinessData {
    pub fn slot(&self, tag: &str) -> Option<&[String]> {
        let slot = match tag {
            "BT" => &self.budget,
            "GR" => &self.gross,
            "OW" => &self.opening_weekend,
            "RT" => &self.rentals,
            "AD" => &self.admissions,
            "SD" => &self.shooting_dates,
            "PD" => &self.production_dates,
            "ST" => &self.studios,
            "CP" => &self.copyright_holders,
            "WG" => &self.weekend_gross,
            _ => return None,
        };
        Some(slot)
    }

    fn slot_mut(&mut self, tag: &str) -> Option<&mut Vec<String>> {
        let slot = match tag {
            "BT" => &mut self.budget,
            "GR" => &mut self.gross,
            "OW" => &mut self.opening_weekend,
            "RT" => &mut self.rentals,
            "AD" => &mut self.admissions,
            "SD" => &mut self.shooting_dates,
            "PD" => &mut self.production_dates,
            "ST" => &mut self.studios,
            "CP" => &mut self.copyright_holders,
            "WG" => &mut self.weekend_gross,
            _ => return None,
        };
        Some(slot)
    }
}

impl RecordPayload for BusinessData {
    fn from_values(values: &[String], line_no: usize) -> Result<Self, ParseError> {
        let mut data = Self::default();
        data.absorb(values, line_no)?;
        Ok(data)
    }

    fn absorb(&mut self, values: &[String], line_no: usize) -> Result<(), ParseError> {
        let tag = value_at(values, 0, "tag", line_no)?;
        let value = value_at(values, 1, "value", line_no)?;
        self.slot_mut(tag)
            .ok_or_else(|| ParseError::UnknownSubKey {
                tag: tag.to_string(),
                line_no,
            })?
            .push(value.to_string());
        Ok(())
    }
}

/// Any payload shape, for mixing lists in one collection type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum AnyPayload {
    Rating(RatingPayload),
    Values(Vec<String>),
    Minutes(Vec<u32>),
    Technical(TechnicalSpecs),
    Business(BusinessData),
}

impl From<RatingPayload> for AnyPayload {
    fn from(p: RatingPayload) -> Self {
        Self::Rating(p)
    }
}

impl From<Vec<String>> for AnyPayload {
    fn from(p: Vec<String>) -> Self {
        Self::Values(p)
    }
}

impl From<Vec<u32>> for AnyPayload {
    fn from(p: Vec<u32>) -> Self {
        Self::Minutes(p)
    }
}

impl From<TechnicalSpecs> for AnyPayload {
    fn from(p: TechnicalSpecs) -> Self {
        Self::Technical(p)
    }
}

impl From<BusinessData> for AnyPayload {
    fn from(p: BusinessData) -> Self {
        Self::Business(p)
    }
}

impl fmt::Display for AnyPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rating(p) => write!(f, "{} votes, rated {}", p.votes, p.rating),
            Self::Values(v) => write!(f, "{}", v.join(" | ")),
            Self::Minutes(v) => {
                let parts: Vec<String> = v.iter().map(|m| format!("{m} min")).collect();
                write!(f, "{}", parts.join(" | "))
            }
            Self::Technical(t) => write_slots(
                f,
                &crate::catalog::TECHNICAL_TAGS,
                |tag| t.slot(tag).unwrap_or(&[]),
            ),
            Self::Business(b) => write_slots(
                f,
                &crate::catalog::BUSINESS_TAGS,
                |tag| b.slot(tag).unwrap_or(&[]),
            ),
        }
    }
}

fn write_slots<'a>(
    f: &mut fmt::Formatter<'_>,
    tags: &[&str],
    slot: impl Fn(&str) -> &'a [String],
) -> fmt::Result {
    let mut first = true;
    for tag in tags {
        for value in slot(tag) {
            if !first {
                f.write_str(" | ")?;
            }
            write!(f, "{tag}: {value}")?;
            first = false;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rating_parse() {
        assert_eq!(Rating::parse("7.8").unwrap().tenths(), 78);
        assert_eq!(Rating::parse("10.0").unwrap().tenths(), 100);
        assert_eq!(Rating::parse("0.1").unwrap().to_string(), "0.1");
        assert!((Rating::parse("9.2").unwrap().as_f64() - 9.2).abs() < 1e-9);
        assert!(Rating::parse("7").is_none());
        assert!(Rating::parse("7.85").is_none());
        assert!(Rating::parse(".5").is_none());
        assert!(Rating::parse("1x.5").is_none());
    }

    #[test]
    fn test_rating_payload_fields() {
        let p = RatingPayload::from_values(&strings(&["456", "7.8"]), 1).unwrap();
        assert_eq!(p.votes, 456);
        assert_eq!(p.rating, Rating::from_tenths(78));
    }

    #[test]
    fn test_running_time_rejects_overflow() {
        let err = Vec::<u32>::from_values(&strings(&["99999999999"]), 9).unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { field: "running time", line_no: 9, .. }));
    }

    #[test]
    fn test_technical_slots_accumulate() {
        let mut specs = TechnicalSpecs::from_values(&strings(&["CAM", "Panavision"]), 1).unwrap();
        specs.absorb(&strings(&["RAT", "2.35 : 1"]), 2).unwrap();
        specs.absorb(&strings(&["CAM", "Arriflex"]), 3).unwrap();
        assert_eq!(specs.camera, strings(&["Panavision", "Arriflex"]));
        assert_eq!(specs.slot("RAT").unwrap(), &strings(&["2.35 : 1"])[..]);
        assert!(specs.slot("XYZ").is_none());
    }

    #[test]
    fn test_unknown_sub_key_is_error() {
        let err = TechnicalSpecs::from_values(&strings(&["FOO", "bar"]), 4).unwrap_err();
        assert!(matches!(err, ParseError::UnknownSubKey { ref tag, line_no: 4 } if tag == "FOO"));

        let mut data = BusinessData::default();
        let err = data.absorb(&strings(&["MV", "x"]), 8).unwrap_err();
        assert!(matches!(err, ParseError::UnknownSubKey { .. }));
    }

    #[test]
    fn test_any_payload_display() {
        let mut data = BusinessData::default();
        data.absorb(&strings(&["BT", "USD 1"]), 1).unwrap();
        data.absorb(&strings(&["GR", "USD 2"]), 2).unwrap();
        assert_eq!(AnyPayload::from(data).to_string(), "BT: USD 1 | GR: USD 2");
        assert_eq!(AnyPayload::from(vec![90u32, 95]).to_string(), "90 min | 95 min");
    }
}
