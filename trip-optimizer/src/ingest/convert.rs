//! Conversion from scraped legs to validated alternatives.
//!
//! Scrapes fail in partial ways, so conversion never gives up on a whole
//! batch: a leg whose duration or price label will not parse gets the
//! metric defaulted to 0.0 and stays in the candidate list, and the
//! caller receives one warning per defaulted field. Defaulted legs are
//! detectable downstream because the original label is preserved on the
//! alternative while the metric reads 0.0.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::warn;

use super::types::RawLeg;
use crate::domain::{Alternative, ItineraryStep, parse_duration_label, parse_price_label};

/// Which metric of a leg had to be defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultedField {
    Duration,
    Price,
}

impl fmt::Display for DefaultedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultedField::Duration => f.write_str("duration"),
            DefaultedField::Price => f.write_str("price"),
        }
    }
}

/// A recovered conversion problem: which leg, which field, and the
/// offending label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWarning {
    /// Index of the leg in the input slice.
    pub leg: usize,
    /// Which metric was defaulted.
    pub field: DefaultedField,
    /// The label that failed to parse (empty when it was missing).
    pub label: String,
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "leg {}: unparseable {} label {:?}, defaulted to 0",
            self.leg, self.field, self.label
        )
    }
}

/// Error loading a leg hand-off file.
#[derive(Debug, thiserror::Error)]
pub enum LegFileError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file was not a valid leg array.
    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convert scraped legs into validated alternatives.
///
/// Conversion never fails. A missing or malformed duration or price
/// label defaults the metric to 0.0, with one [`ConversionWarning`] per
/// defaulted field; missing connections default to 0 and missing station
/// text to empty strings. Itinerary steps are ordered by their `order`
/// field, falling back to scrape order. Alternatives come back in input
/// order, so warning indices line up with the returned list.
///
/// # Examples
///
/// ```
/// use trip_optimizer::ingest::{RawLeg, convert_legs};
///
/// let legs = vec![RawLeg {
///     duration_label: Some("25h 6min".to_string()),
///     price_label: Some("not available".to_string()),
///     ..Default::default()
/// }];
///
/// let (alternatives, warnings) = convert_legs(&legs);
/// assert_eq!(alternatives[0].time_hours(), 25.1);
/// assert_eq!(alternatives[0].price(), 0.0);
/// assert_eq!(warnings.len(), 1);
/// ```
pub fn convert_legs(legs: &[RawLeg]) -> (Vec<Alternative>, Vec<ConversionWarning>) {
    let mut alternatives = Vec::with_capacity(legs.len());
    let mut warnings = Vec::new();

    for (index, leg) in legs.iter().enumerate() {
        let duration_label = leg.duration_label.as_deref().unwrap_or("");
        let time_hours = match parse_duration_label(duration_label) {
            Ok(hours) => hours,
            Err(error) => {
                warn!(
                    leg = index,
                    label = duration_label,
                    error = %error,
                    "defaulting duration to 0"
                );
                warnings.push(ConversionWarning {
                    leg: index,
                    field: DefaultedField::Duration,
                    label: duration_label.to_string(),
                });
                0.0
            }
        };

        let price_label = leg.price_label.as_deref().unwrap_or("");
        let price = match parse_price_label(price_label) {
            Ok(price) => price,
            Err(error) => {
                warn!(
                    leg = index,
                    label = price_label,
                    error = %error,
                    "defaulting price to 0"
                );
                warnings.push(ConversionWarning {
                    leg: index,
                    field: DefaultedField::Price,
                    label: price_label.to_string(),
                });
                0.0
            }
        };

        let steps: Vec<ItineraryStep> = leg
            .itinerary_steps
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .enumerate()
            .map(|(position, step)| ItineraryStep {
                text: step.text.clone().unwrap_or_default(),
                order: step.order.unwrap_or(position),
            })
            .collect();

        // The label parsers only produce finite non-negative metrics, so
        // construction failing here means a parser regression
        match Alternative::new(
            time_hours,
            price,
            leg.connections.unwrap_or(0),
            leg.departure.clone().unwrap_or_default(),
            leg.arrival.clone().unwrap_or_default(),
        ) {
            Ok(alternative) => alternatives.push(
                alternative
                    .with_labels(duration_label, price_label)
                    .with_itinerary(steps),
            ),
            Err(error) => {
                warn!(leg = index, error = %error, "dropping unconvertible leg");
            }
        }
    }

    (alternatives, warnings)
}

/// Load scraped legs from a JSON hand-off file.
///
/// The file carries an array of legs; see [`RawLeg`] for the shape.
pub fn load_legs(path: impl AsRef<Path>) -> Result<Vec<RawLeg>, LegFileError> {
    let path = path.as_ref();

    let text = fs::read_to_string(path).map_err(|source| LegFileError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| LegFileError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn leg(duration: &str, price: &str) -> RawLeg {
        RawLeg {
            departure: Some("Paris 08:00".to_string()),
            arrival: Some("Roma 21:06".to_string()),
            duration_label: Some(duration.to_string()),
            price_label: Some(price.to_string()),
            connections: Some(2),
            itinerary_steps: None,
        }
    }

    #[test]
    fn clean_legs_convert_without_warnings() {
        let legs = vec![leg("25h 6min", "R$8.659,00"), leg("3h", "R$120,00")];

        let (alternatives, warnings) = convert_legs(&legs);

        assert!(warnings.is_empty());
        assert_eq!(alternatives.len(), 2);
        assert_eq!(alternatives[0].time_hours(), 25.1);
        assert_eq!(alternatives[0].price(), 8659.0);
        assert_eq!(alternatives[0].connections(), 2);
        assert_eq!(alternatives[0].departure(), "Paris 08:00");
        assert_eq!(alternatives[0].duration_label(), "25h 6min");
        assert_eq!(alternatives[1].time_hours(), 3.0);
    }

    #[test]
    fn malformed_duration_defaults_with_warning() {
        let legs = vec![leg("overnight", "R$100,00")];

        let (alternatives, warnings) = convert_legs(&legs);

        assert_eq!(alternatives[0].time_hours(), 0.0);
        assert_eq!(alternatives[0].price(), 100.0);
        // The scraped label survives even though the metric defaulted
        assert_eq!(alternatives[0].duration_label(), "overnight");

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].leg, 0);
        assert_eq!(warnings[0].field, DefaultedField::Duration);
        assert_eq!(warnings[0].label, "overnight");
    }

    #[test]
    fn missing_labels_default_both_fields() {
        let legs = vec![RawLeg::default()];

        let (alternatives, warnings) = convert_legs(&legs);

        assert_eq!(alternatives.len(), 1);
        assert_eq!(alternatives[0].time_hours(), 0.0);
        assert_eq!(alternatives[0].price(), 0.0);
        assert_eq!(alternatives[0].connections(), 0);

        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].field, DefaultedField::Duration);
        assert_eq!(warnings[1].field, DefaultedField::Price);
        assert_eq!(warnings[0].label, "");
    }

    #[test]
    fn warning_indices_follow_input_order() {
        let legs = vec![
            leg("3h", "R$100,00"),
            leg("soon", "R$100,00"),
            leg("3h", "call us"),
        ];

        let (alternatives, warnings) = convert_legs(&legs);

        assert_eq!(alternatives.len(), 3);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].leg, 1);
        assert_eq!(warnings[0].field, DefaultedField::Duration);
        assert_eq!(warnings[1].leg, 2);
        assert_eq!(warnings[1].field, DefaultedField::Price);
    }

    #[test]
    fn steps_are_ordered_and_positions_backfill() {
        use crate::ingest::RawItineraryStep;

        let mut raw = leg("3h", "R$100,00");
        raw.itinerary_steps = Some(vec![
            RawItineraryStep {
                text: Some("Walk to hotel".to_string()),
                order: Some(2),
            },
            RawItineraryStep {
                text: Some("Change at hub".to_string()),
                order: None,
            },
            RawItineraryStep {
                text: Some("Board train".to_string()),
                order: Some(0),
            },
        ]);

        let (alternatives, _) = convert_legs(&[raw]);

        // The unordered step inherits its scrape position (1)
        let texts: Vec<&str> = alternatives[0]
            .itinerary()
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Board train", "Change at hub", "Walk to hotel"]);
    }

    #[test]
    fn warning_message_names_the_field_and_label() {
        let warning = ConversionWarning {
            leg: 3,
            field: DefaultedField::Price,
            label: "call us".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "leg 3: unparseable price label \"call us\", defaulted to 0"
        );
    }

    #[test]
    fn load_legs_reads_a_hand_off_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legs.json");
        fs::write(
            &path,
            r#"[
                {"departure": "Paris", "arrival": "Roma",
                 "duration_label": "25h 6min", "price_label": "R$8.659,00",
                 "connections": 2},
                {"duration_label": "3h"}
            ]"#,
        )
        .unwrap();

        let legs = load_legs(&path).unwrap();

        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].departure.as_deref(), Some("Paris"));
        assert!(legs[1].price_label.is_none());
    }

    #[test]
    fn load_legs_reports_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let error = load_legs(&path).unwrap_err();
        assert!(matches!(error, LegFileError::Io { .. }));
        assert!(error.to_string().contains("absent.json"));
    }

    #[test]
    fn load_legs_reports_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legs.json");
        fs::write(&path, "{ not json").unwrap();

        let error = load_legs(&path).unwrap_err();
        assert!(matches!(error, LegFileError::Json { .. }));
    }

    #[test]
    fn loaded_file_feeds_straight_into_conversion() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legs.json");
        fs::write(
            &path,
            r#"[{"duration_label": "15h", "price_label": "R$1.500,00",
                 "connections": 1, "departure": "Lisbon", "arrival": "Madrid"}]"#,
        )
        .unwrap();

        let legs = load_legs(&path).unwrap();
        let (alternatives, warnings) = convert_legs(&legs);

        assert!(warnings.is_empty());
        assert_eq!(alternatives[0].time_hours(), 15.0);
        assert_eq!(alternatives[0].price(), 1500.0);
    }
}
