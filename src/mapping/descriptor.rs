//! Output-event descriptors for logical controls.
//!
//! A descriptor says what a single logical button or axis emits on the
//! virtual device side. Buttons and axes have separate descriptor types
//! because their class sets differ: a button can become a key or relative
//! motion, an axis additionally an absolute axis or a threshold-emulated
//! key pair. Each variant carries exactly the parameters its class needs,
//! so no partially-initialized descriptor is representable.
//!
//! Descriptors can be built programmatically or parsed from a compact
//! colon-separated text form (`SYMBOL[:PARAM1[:PARAM2]]`), see
//! [`ButtonTarget::from_text`] and [`AxisTarget::from_text`].

use std::str::FromStr;

use crate::mapping::error::MappingError;
use crate::mapping::symbols::{self, EventKind};

/// Default step magnitude for relative motion driven by a button.
pub const BUTTON_REL_STEP: i32 = 3;
/// Default repeat interval for button-driven relative motion.
pub const BUTTON_REL_REPEAT_MS: u64 = 100;
/// Default step magnitude for relative motion driven by an axis.
pub const AXIS_REL_STEP: i32 = 5;
/// Default repeat interval for axis-driven relative motion.
pub const AXIS_REL_REPEAT_MS: u64 = 10;
/// Default magnitude above which a threshold-emulated key turns active.
pub const DEFAULT_THRESHOLD: i32 = 8000;

/// Output behavior of one logical button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonTarget {
    /// Button is not mapped to anything.
    #[default]
    None,
    /// Digital key or button toggle.
    Key { code: u16 },
    /// Relative motion emitted by the repeat timer while the button is held.
    Rel { code: u16, step: i32, repeat_ms: u64 },
}

/// Output behavior of one logical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisTarget {
    /// Axis is not mapped to anything.
    #[default]
    None,
    /// Absolute axis position, forwarded verbatim.
    Abs { code: u16 },
    /// Relative motion emitted by the repeat timer, scaled by the axis sign.
    Rel { code: u16, step: i32, repeat_ms: u64 },
    /// Two digital keys emulated from the axis magnitude: `primary` is
    /// active while the value sits below `-threshold`, `secondary` while it
    /// sits above `+threshold`.
    Key {
        primary: u16,
        secondary: u16,
        threshold: i32,
    },
}

fn parse_num<T: FromStr>(spec: &str, token: &str) -> Result<T, MappingError> {
    token.parse().map_err(|_| MappingError::InvalidParameter {
        spec: spec.to_string(),
        token: token.to_string(),
    })
}

impl ButtonTarget {
    pub fn key(code: u16) -> Self {
        Self::Key { code }
    }

    /// Relative-motion target with the button-sourced defaults.
    pub fn rel(code: u16) -> Self {
        Self::Rel {
            code,
            step: BUTTON_REL_STEP,
            repeat_ms: BUTTON_REL_REPEAT_MS,
        }
    }

    /// Parses a textual button mapping, `SYMBOL[:step[:repeat_ms]]`.
    ///
    /// Token 0 must resolve through the symbol table; the extra tokens are
    /// positional and only consumed by relative-motion targets (key targets
    /// ignore them, mirroring the permissive original format). Missing or
    /// empty tokens keep the class defaults.
    pub fn from_text(spec: &str) -> Result<Self, MappingError> {
        let mut tokens = spec.split(':');
        let symbol = tokens.next().unwrap_or_default();
        let (kind, code) =
            symbols::lookup(symbol).ok_or_else(|| MappingError::UnknownSymbol {
                spec: spec.to_string(),
                token: symbol.to_string(),
            })?;

        let mut target = match kind {
            EventKind::Key => Self::key(code),
            EventKind::Rel => Self::rel(code),
            EventKind::Abs => {
                return Err(MappingError::UnsupportedTarget {
                    spec: spec.to_string(),
                    token: symbol.to_string(),
                })
            }
        };

        for (pos, token) in tokens.enumerate() {
            if token.is_empty() {
                continue;
            }
            if let Self::Rel { step, repeat_ms, .. } = &mut target {
                match pos {
                    0 => *step = parse_num(spec, token)?,
                    1 => *repeat_ms = parse_num(spec, token)?,
                    _ => {}
                }
            }
        }

        Ok(target)
    }

    /// Re-serializes the descriptor into its text form. `None` targets and
    /// codes outside the symbol table have no representation.
    pub fn to_text(&self) -> Option<String> {
        match *self {
            Self::None => None,
            Self::Key { code } => symbols::name_of(EventKind::Key, code).map(str::to_string),
            Self::Rel {
                code,
                step,
                repeat_ms,
            } => symbols::name_of(EventKind::Rel, code)
                .map(|sym| format!("{sym}:{step}:{repeat_ms}")),
        }
    }
}

impl AxisTarget {
    pub fn abs(code: u16) -> Self {
        Self::Abs { code }
    }

    /// Relative-motion target with the axis-sourced defaults.
    pub fn rel(code: u16) -> Self {
        Self::Rel {
            code,
            step: AXIS_REL_STEP,
            repeat_ms: AXIS_REL_REPEAT_MS,
        }
    }

    /// Threshold-key target; the secondary code starts equal to the primary
    /// until a spec or caller overrides it.
    pub fn key(primary: u16) -> Self {
        Self::Key {
            primary,
            secondary: primary,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Parses a textual axis mapping.
    ///
    /// Per class the extra tokens mean: relative motion
    /// `SYMBOL[:step[:repeat_ms]]`, threshold keys
    /// `SYMBOL[:SECONDARY_SYMBOL[:threshold]]`, absolute axes take none.
    /// Missing or empty tokens keep the class defaults; tokens a class does
    /// not consume are ignored.
    pub fn from_text(spec: &str) -> Result<Self, MappingError> {
        let mut tokens = spec.split(':');
        let symbol = tokens.next().unwrap_or_default();
        let (kind, code) =
            symbols::lookup(symbol).ok_or_else(|| MappingError::UnknownSymbol {
                spec: spec.to_string(),
                token: symbol.to_string(),
            })?;

        let mut target = match kind {
            EventKind::Abs => Self::abs(code),
            EventKind::Rel => Self::rel(code),
            EventKind::Key => Self::key(code),
        };

        for (pos, token) in tokens.enumerate() {
            if token.is_empty() {
                continue;
            }
            match &mut target {
                Self::Rel { step, repeat_ms, .. } => match pos {
                    0 => *step = parse_num(spec, token)?,
                    1 => *repeat_ms = parse_num(spec, token)?,
                    _ => {}
                },
                Self::Key {
                    secondary,
                    threshold,
                    ..
                } => match pos {
                    0 => match symbols::lookup(token) {
                        Some((EventKind::Key, sec)) => *secondary = sec,
                        Some(_) => {
                            return Err(MappingError::UnsupportedTarget {
                                spec: spec.to_string(),
                                token: token.to_string(),
                            })
                        }
                        None => {
                            return Err(MappingError::UnknownSymbol {
                                spec: spec.to_string(),
                                token: token.to_string(),
                            })
                        }
                    },
                    1 => *threshold = parse_num(spec, token)?,
                    _ => {}
                },
                Self::Abs { .. } | Self::None => {}
            }
        }

        Ok(target)
    }

    /// Re-serializes the descriptor into its text form.
    pub fn to_text(&self) -> Option<String> {
        match *self {
            Self::None => None,
            Self::Abs { code } => symbols::name_of(EventKind::Abs, code).map(str::to_string),
            Self::Rel {
                code,
                step,
                repeat_ms,
            } => symbols::name_of(EventKind::Rel, code)
                .map(|sym| format!("{sym}:{step}:{repeat_ms}")),
            Self::Key {
                primary,
                secondary,
                threshold,
            } => {
                let sym = symbols::name_of(EventKind::Key, primary)?;
                let sec = symbols::name_of(EventKind::Key, secondary)?;
                Some(format!("{sym}:{sec}:{threshold}"))
            }
        }
    }
}
