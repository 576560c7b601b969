//! # Handle → model bindings
//!
//! [`UniverseDynamicRegistry`] binds external body handles (scene nodes, ids, …) to the
//! models a [`ModelProvider`] owns, by identity: a bound handle reads the provider's own
//! instance, and a single `seek` per frame moves exactly the bound subset of them.
//! Consumers that need an independently seekable view (trails) clone a model instead.
//!
//! ## Invariants
//! -----------------
//! * A handle is bound at most once. Adding a bound handle is reported as
//!   [`OrreryError::AlreadyBound`], removing an unbound one as [`OrreryError::NotBound`];
//!   neither touches the existing bindings.
//! * `seek` reaches exactly the bound models, and nothing when the time did not change.
//! * A model bound after a `seek` is brought to the registry's current time.
use log::{trace, warn};
use nalgebra::{UnitQuaternion, Vector3};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::dynamics::CelestialModel;
use crate::orrery_errors::OrreryError;
use crate::time::TimeValue;

/// Owner of the models a registry binds to.
///
/// `model_mut` hands out the provider's own instance for `handle`, the same one on every
/// call; `None` means the provider has no model for that handle. Callers may seek the
/// returned model, so a provider caching its own time must treat the call as a change.
pub trait ModelProvider<H> {
    fn model_mut(&mut self, handle: &H) -> Option<&mut (dyn CelestialModel + 'static)>;
}

impl<H, P: ModelProvider<H> + ?Sized> ModelProvider<H> for &mut P {
    fn model_mut(&mut self, handle: &H) -> Option<&mut (dyn CelestialModel + 'static)> {
        (**self).model_mut(handle)
    }
}

pub struct UniverseDynamicRegistry<H, P> {
    provider: P,
    bound: HashSet<H>,
    last_time: Option<TimeValue>,
}

impl<H, P> UniverseDynamicRegistry<H, P>
where
    H: Eq + Hash + Clone + Debug,
    P: ModelProvider<H>,
{
    pub fn new(provider: P) -> Self {
        UniverseDynamicRegistry {
            provider,
            bound: HashSet::new(),
            last_time: None,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the provider, e.g. to read unbound models.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Give the provider back, dropping every binding.
    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Bind `handle` to the provider's model for it.
    ///
    /// Return
    /// ----------
    /// * `Ok(true)` – the handle is now bound.
    /// * `Ok(false)` – the provider has no model for this handle, nothing is bound.
    /// * `Err(OrreryError::AlreadyBound)` – the handle was already bound.
    pub fn add(&mut self, handle: H) -> Result<bool, OrreryError> {
        if self.bound.contains(&handle) {
            return Err(OrreryError::AlreadyBound(format!("{handle:?}")));
        }

        let Some(model) = self.provider.model_mut(&handle) else {
            warn!("No dynamic model available for {handle:?}");
            return Ok(false);
        };

        if let Some(time) = self.last_time {
            model.seek(time);
        }
        self.bound.insert(handle);
        Ok(true)
    }

    /// Unbind `handle`. The provider keeps its model where the last `seek` left it.
    pub fn remove(&mut self, handle: &H) -> Result<(), OrreryError> {
        if self.bound.remove(handle) {
            Ok(())
        } else {
            Err(OrreryError::NotBound(format!("{handle:?}")))
        }
    }

    pub fn contains(&self, handle: &H) -> bool {
        self.bound.contains(handle)
    }

    /// The bound model for `handle`, `None` when the handle is not bound.
    pub fn get_mut(&mut self, handle: &H) -> Option<&mut (dyn CelestialModel + 'static)> {
        if !self.bound.contains(handle) {
            return None;
        }
        self.provider.model_mut(handle)
    }

    /// Bound handles, in no particular order.
    pub fn handles(&self) -> impl Iterator<Item = &H> {
        self.bound.iter()
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Time of the last effective `seek`.
    pub fn time(&self) -> Option<TimeValue> {
        self.last_time
    }

    pub fn seek(&mut self, time: TimeValue) {
        if self.last_time == Some(time) {
            trace!("Registry already at {time}, seek skipped");
            return;
        }
        self.last_time = Some(time);
        for handle in self.bound.iter() {
            if let Some(model) = self.provider.model_mut(handle) {
                model.seek(time);
            }
        }
    }

    pub fn position(&mut self, handle: &H) -> Result<Vector3<f64>, OrreryError> {
        self.bound_mut(handle)?.position()
    }

    pub fn orientation(&mut self, handle: &H) -> Result<UnitQuaternion<f64>, OrreryError> {
        self.bound_mut(handle)?.orientation()
    }

    fn bound_mut(
        &mut self,
        handle: &H,
    ) -> Result<&mut (dyn CelestialModel + 'static), OrreryError> {
        self.get_mut(handle)
            .ok_or_else(|| OrreryError::NotBound(format!("{handle:?}")))
    }
}
