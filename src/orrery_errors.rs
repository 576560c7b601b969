use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum OrreryError {
    #[error(
        "Kepler equation failed to converge (M = {mean_anomaly}, e = {eccentricity}, \
         final E after {iterations} iterations = {last_estimate})"
    )]
    KeplerNotConverged {
        mean_anomaly: f64,
        eccentricity: f64,
        last_estimate: f64,
        iterations: usize,
    },

    #[error("Already bound: {0}")]
    AlreadyBound(String),

    #[error("Not bound: {0}")]
    NotBound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid time step: {0} (must be strictly positive)")]
    InvalidTimeStep(i64),
}

impl PartialEq for OrreryError {
    fn eq(&self, other: &Self) -> bool {
        use OrreryError::*;
        match (self, other) {
            (
                KeplerNotConverged {
                    mean_anomaly: m1,
                    eccentricity: e1,
                    iterations: i1,
                    ..
                },
                KeplerNotConverged {
                    mean_anomaly: m2,
                    eccentricity: e2,
                    iterations: i2,
                    ..
                },
            ) => m1 == m2 && e1 == e2 && i1 == i2,
            (AlreadyBound(a), AlreadyBound(b)) => a == b,
            (NotBound(a), NotBound(b)) => a == b,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,
            (InvalidTimeStep(a), InvalidTimeStep(b)) => a == b,
            _ => false,
        }
    }
}
