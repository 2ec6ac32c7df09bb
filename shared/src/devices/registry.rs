use std::collections::HashMap;

use log::warn;

use crate::{
    devices::{error::RegistryError, StandardDevicesPlugin},
    graph::device::Device,
};

/// A device kind the registry knows how to build
pub trait DeviceKind {
    /// Stable name used on the wire
    const KIND: &'static str;

    /// A fresh instance with default settings
    fn build() -> Device;
}

/// Registers a group of device kinds at once
pub trait RegistryPlugin {
    fn build(&self, registry: &mut DeviceRegistry);
}

/// Maps kind names to device constructors. Every participant must hold the
/// same set of kinds for Place operations to resolve.
pub struct DeviceRegistry {
    kinds: HashMap<&'static str, fn() -> Device>,
    locked: bool,
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        StandardDevicesPlugin.build(&mut registry);
        registry
    }
}

impl DeviceRegistry {
    /// A registry with no kinds at all
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
            locked: false,
        }
    }

    /// A registry preloaded with the standard devices
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn add_plugin<P: RegistryPlugin>(&mut self, plugin: P) -> &mut Self {
        self.check_lock();
        plugin.build(self);
        self
    }

    pub fn add_device<D: DeviceKind>(&mut self) -> &mut Self {
        self.check_lock();
        self.insert(D::KIND, D::build);
        self
    }

    // Non-panicking builder methods

    pub fn try_add_plugin<P: RegistryPlugin>(&mut self, plugin: P) -> Result<&mut Self, RegistryError> {
        self.try_check_lock()?;
        plugin.build(self);
        Ok(self)
    }

    pub fn try_add_device<D: DeviceKind>(&mut self) -> Result<&mut Self, RegistryError> {
        self.try_check_lock()?;
        self.insert(D::KIND, D::build);
        Ok(self)
    }

    pub fn try_lock(&mut self) -> Result<(), RegistryError> {
        self.try_check_lock()?;
        self.locked = true;
        Ok(())
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns Err if the registry is locked
    pub fn try_check_lock(&self) -> Result<(), RegistryError> {
        if self.locked {
            Err(RegistryError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    /// Panics if the registry is locked
    pub fn check_lock(&self) {
        if self.locked {
            panic!("Device registry already locked!");
        }
    }

    fn insert(&mut self, kind: &'static str, constructor: fn() -> Device) {
        if self.kinds.insert(kind, constructor).is_some() {
            warn!("Device kind {} registered twice, keeping the latest", kind);
        }
    }

    // Lookup

    /// Builds a fresh instance of `kind` with its default settings
    pub fn create(&self, kind: &str) -> Result<Device, RegistryError> {
        match self.kinds.get(kind) {
            Some(constructor) => Ok(constructor()),
            None => Err(RegistryError::UnknownDeviceKind {
                kind: kind.to_string(),
            }),
        }
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// Registered kind names, sorted
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<&'static str> = self.kinds.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
