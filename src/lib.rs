//! glyphfx is a per-character animation engine for terminal text effects.
//!
//! Input text is split into characters, each of which owns its own motion (paths made of
//! waypoints, traversed at a speed with easing), its own animation (scenes of colored frames) and
//! a table of event bindings that chain the two together. A [`Canvas`] ticks every active
//! character and emits one ANSI frame string per tick that only rewrites the rows that changed.
//!
//! # Pipeline overview
//!
//! 1. **Decompose**: input text -> positioned glyphs ([`decompose_input`], [`Canvas::from_input`])
//! 2. **Build**: an [`Effect`] configures paths, scenes and events on every [`EffectCharacter`]
//! 3. **Tick**: each character steps its motion, then its animator, dispatching events in between
//! 4. **Render**: [`Canvas::get_formatted_output_string`] diffs the frame into escape sequences
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: every random choice goes through a seeded [`Rng64`], so a seed and an
//!   input always produce the same frames.
//! - **No IO in the engine**: terminal size and input are handed in; only the binary touches stdio.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod color;
mod effects;
mod engine;
mod foundation;
mod motion;
mod render;

pub use animation::animator::{Animator, AnimatorStep, PathProgress};
pub use animation::ease::Ease;
pub use animation::scene::{Frame, Scene, SceneId, Style, SyncMetric, Visual};
pub use color::color::{Color, Rgb, rgb_to_xterm, xterm_to_rgb};
pub use color::gradient::{Direction, Gradient};
pub use effects::expand::{Expand, ExpandConfig};
pub use effects::fireworks::{Fireworks, FireworksConfig};
pub use effects::spray::{Spray, SprayConfig, SprayPosition};
pub use effects::{ActiveSet, Effect, EffectKind, build_effect};
pub use engine::character::{CharacterId, EffectCharacter, MAX_CASCADE};
pub use engine::events::{Action, Event, EventHandler, EventSource, Occurrence};
pub use foundation::core::{Coord, Point, Rng64, Vec2};
pub use foundation::error::{GlyphfxError, GlyphfxResult};
pub use foundation::geometry;
pub use motion::motion::Motion;
pub use motion::path::{Path, PathId, Waypoint};
pub use render::ansi;
pub use render::canvas::{Canvas, CharacterGroup};
pub use render::input::{DecomposedInput, TerminalConfig, decompose_input};
