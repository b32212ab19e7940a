//! Button registries.
//!
//! Each visible button belongs to exactly one [`ButtonRegistry`], keyed by
//! its [`ButtonKind`]. Registries follow the [`StateStore`](crate::state::StateStore)
//! only while they have visible instances.

pub mod button_registry;
pub mod instance;
pub mod key_action;
pub mod kind;
pub mod kinds;

pub use button_registry::{ButtonRegistry, DriveMode, RegistryContext};
pub use instance::InstanceState;
pub use key_action::KeyComboAction;
pub use kind::{merge_settings, ButtonHandler, ButtonKind, MergedSettings};
pub use kinds::{HealthMeter, PrayerIcon, PrayerMeter, RunMeter, SpecialAttackMeter, TabIcon};
