pub const EXERCISE_NAME_MAX_LENGTH: usize = 100;

pub const WORKOUT_DURATION_MIN: i64 = 1;
/// 8 hours
pub const WORKOUT_DURATION_MAX: i64 = 480;
