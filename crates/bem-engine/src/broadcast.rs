//! Reconciles channel lengths against the canonical surface list.

use std::fmt;

use bem_model::Channel;

use crate::error::{EngineError, EngineResult};
use crate::notice::{self, NoticeSink};

/// How a single supplied value is treated when there are several surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    /// One value applies to every surface.
    Broadcast,
    /// One value applies to the first surface only; the rest are filled.
    Positional,
}

/// Value used for surfaces past the end of a channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill<T> {
    Fixed(T),
    /// Reuse the channel's first value.
    First,
    /// Leave the attribute untouched.
    Leave,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSpec<T> {
    pub name: &'static str,
    /// What the value stands for, used in substitution notices.
    pub describes: &'static str,
    pub scalar: Scalar,
    pub fill: Fill<T>,
}

/// Produces one slot per label.
///
/// Supplied values are taken positionally. Past the end of the channel the
/// channel's fill applies and each substitution is reported to `sink` naming the
/// affected surface. A channel that still has values once the labels run out
/// fails with `ChannelOverflow`.
pub fn broadcast<T: Clone + fmt::Display>(
    spec: &ChannelSpec<T>,
    channel: &Channel<T>,
    labels: &[String],
    sink: &mut dyn NoticeSink,
) -> EngineResult<Vec<Option<T>>> {
    let broadcast_scalar = spec.scalar == Scalar::Broadcast && channel.len() == 1;

    let mut labels_iter = labels.iter();
    let mut values_iter = channel.values().iter();
    let mut out = Vec::with_capacity(labels.len());

    loop {
        match (labels_iter.next(), values_iter.next()) {
            (Some(_), Some(value)) => out.push(Some(value.clone())),
            (Some(label), None) => {
                if broadcast_scalar {
                    out.push(channel.first().cloned());
                    continue;
                }
                let filled = match &spec.fill {
                    Fill::Fixed(value) => Some(value.clone()),
                    Fill::First => Some(channel.first().cloned().ok_or_else(|| {
                        EngineError::Internal {
                            what: format!("{} has no first value to reuse", spec.name),
                        }
                    })?),
                    Fill::Leave => None,
                };
                if let Some(value) = &filled {
                    notice::info(
                        sink,
                        format!(
                            "No corresponding {} for {}, {} used instead",
                            spec.describes, label, value
                        ),
                    );
                }
                out.push(filled);
            }
            (None, Some(_)) => {
                return Err(EngineError::ChannelOverflow {
                    channel: spec.name,
                    surfaces: labels.len(),
                });
            }
            (None, None) => break,
        }
    }

    tracing::debug!(
        channel = spec.name,
        supplied = channel.len(),
        surfaces = labels.len(),
        "channel broadcast"
    );
    Ok(out)
}

/// Like [`broadcast`] for channels whose fill always yields a value.
pub fn broadcast_required<T: Clone + fmt::Display>(
    spec: &ChannelSpec<T>,
    channel: &Channel<T>,
    labels: &[String],
    sink: &mut dyn NoticeSink,
) -> EngineResult<Vec<T>> {
    broadcast(spec, channel, labels, sink)?
        .into_iter()
        .map(|slot| {
            slot.ok_or_else(|| EngineError::Internal {
                what: format!("{} left a surface without a value", spec.name),
            })
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn always_one_slot_per_surface(
            n in 1_usize..12,
            values in prop::collection::vec(0.0_f64..1.0_f64, 1..12),
        ) {
            let spec = ChannelSpec {
                name: "coverage_fraction",
                describes: "surface area fraction",
                scalar: Scalar::Positional,
                fill: Fill::Fixed(0.5),
            };
            let labels: Vec<String> = (0..n).map(|i| i.to_string()).collect();
            let mut notices: Vec<crate::notice::Notice> = Vec::new();
            let result = broadcast_required(&spec, &Channel::new(values.clone()), &labels, &mut notices);

            if values.len() > n {
                let is_overflow = matches!(result, Err(EngineError::ChannelOverflow { .. }));
                prop_assert!(is_overflow);
            } else {
                let out = result.unwrap();
                prop_assert_eq!(out.len(), n);
                prop_assert_eq!(&out[..values.len()], &values[..]);
                prop_assert!(out[values.len()..].iter().all(|v| *v == 0.5));
                prop_assert_eq!(notices.len(), n - values.len());
            }
        }
    }
}
