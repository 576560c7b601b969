use approx::assert_abs_diff_eq;
use nalgebra::{UnitQuaternion, Vector3};

/// Route `log` output through the test harness; safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn assert_vec_close(actual: &Vector3<f64>, expected: &Vector3<f64>, epsilon: f64) {
    assert_abs_diff_eq!(actual.x, expected.x, epsilon = epsilon);
    assert_abs_diff_eq!(actual.y, expected.y, epsilon = epsilon);
    assert_abs_diff_eq!(actual.z, expected.z, epsilon = epsilon);
}

/// Rotations are compared by angle, so `q` and `-q` are the same orientation.
pub fn assert_rotation_close(
    actual: &UnitQuaternion<f64>,
    expected: &UnitQuaternion<f64>,
    epsilon: f64,
) {
    assert_abs_diff_eq!(actual.angle_to(expected), 0.0, epsilon = epsilon);
}
