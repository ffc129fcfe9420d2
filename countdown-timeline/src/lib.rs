//! Countdown timeline core
//!
//! Builds the time-remaining curve from an event log, clusters the events
//! visible in a pannable/zoomable viewport, and hit-tests the pointer against
//! both. Rendering is left to the caller, which receives a [`TimelineFrame`]
//! per recomputation cycle.

pub mod annotations;
pub mod clustering;
pub mod config;
pub mod curve;
pub mod frame;
pub mod hover;
pub mod status;
pub mod time_domain;
pub mod timeline;
pub mod viewport;

pub use annotations::Annotation;
pub use clustering::{Cluster, JenksBreaks, NaturalBreaks};
pub use config::{ConfigError, TimelineConfig};
pub use curve::build_curve;
pub use frame::TimelineFrame;
pub use hover::{HoverLocator, HoverPoint, ScreenPoint};
pub use time_domain::{CurvePoint, DateExtent, Event, Timestamp};
pub use timeline::Timeline;
pub use viewport::{BrushSelection, ViewportController, ViewportState, WheelGesture};
