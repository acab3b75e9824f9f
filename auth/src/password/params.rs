use argon2::Params;
use serde::Deserialize;
use serde::Serialize;

use super::errors::PasswordError;

/// Argon2id work factor.
///
/// Defaults to the `argon2` crate baseline (19 MiB, 2 passes, 1 lane),
/// which matches current OWASP guidance for Argon2id. Raise it as
/// hardware gets faster; hashes made under older params keep verifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes over memory
    pub iterations: u32,

    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl HashingParams {
    /// Convert into validated `argon2` parameters.
    ///
    /// # Errors
    /// * `InvalidParams` - Values are outside what Argon2 accepts
    pub fn to_argon2(&self) -> Result<Params, PasswordError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))
    }
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl From<&Params> for HashingParams {
    fn from(params: &Params) -> Self {
        Self {
            memory_kib: params.m_cost(),
            iterations: params.t_cost(),
            parallelism: params.p_cost(),
        }
    }
}
