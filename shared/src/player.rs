//! Player tuning constants

/// Player movement speed (units per second)
pub const PLAYER_SPEED: f32 = 8.0;

/// Speed multiplier while sprinting
pub const SPRINT_MULTIPLIER: f32 = 1.75;

/// Player height (for capsule)
pub const PLAYER_HEIGHT: f32 = 1.8;

/// Player radius (for capsule)
pub const PLAYER_RADIUS: f32 = 0.35;

/// Jump velocity in m/s (upward, one-shot when grounded)
pub const JUMP_VELOCITY: f32 = 7.5;

/// Vertical speed the booster climbs at while ascend is held.
/// Never applied if the body is already moving up faster than this.
pub const BOOSTER_ASCEND_SPEED: f32 = 6.0;

/// Proportional gain of the air-hold altitude controller.
pub const BOOSTER_HOLD_GAIN: f32 = 5.0;

/// Proportional gain of the ground-hover correction.
pub const BOOSTER_HOVER_GAIN: f32 = 3.0;

/// Largest vertical correction (m/s) either booster sub-mode may command.
pub const BOOSTER_MAX_CORRECTION: f32 = 5.0;

/// Hover distance the booster tries to keep above terrain in ground-hover mode.
pub const HOVER_TARGET_DISTANCE: f32 = 1.6;

/// How far down the ground-hover probe looks for terrain.
pub const HOVER_PROBE_LENGTH: f32 = 6.0;

/// Extra reach of the grounded probe below the capsule's lower half.
pub const GROUND_PROBE_MARGIN: f32 = 0.2;

/// Feet-at-world-zero tolerance for the degenerate-ground fallback.
pub const GROUND_CONTACT_EPSILON: f32 = 0.05;

/// Yaw slerp factor per tick (exponential smoothing, not a constant turn rate)
pub const YAW_SMOOTHING: f32 = 0.1;

/// Mouse sensitivity for look
pub const MOUSE_SENSITIVITY: f32 = 0.003;

/// Spawn position for the player (above the ground to prevent clipping)
pub const SPAWN_POSITION: [f32; 3] = [0.0, 3.0, 0.0];
