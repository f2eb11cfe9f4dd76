use glam::{Vec2, Vec3, Vec4};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Texture(u32),
}

impl UniformValue {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            UniformValue::Float(value) => Some(*value),
            _ => None,
        }
    }
}

/// Named uniform values handed to a shader program.
///
/// Entries are kept in name order so the packed byte block is stable
/// between frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniformSet {
    values: BTreeMap<String, UniformValue>,
}

impl UniformSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: UniformValue) -> Option<UniformValue> {
        self.values.insert(name.into(), value)
    }

    /// Overwrite an existing entry. Returns `false` if `name` is not declared.
    pub fn set(&mut self, name: &str, value: UniformValue) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(UniformValue::as_float)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Add every entry of `other`, replacing entries with the same name.
    pub fn extend(&mut self, other: &UniformSet) {
        for (name, value) in other.iter() {
            self.values.insert(name.to_string(), *value);
        }
    }

    /// Tightly packed little-endian block of all values in name order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for value in self.values.values() {
            match value {
                UniformValue::Float(v) => bytes.extend_from_slice(bytemuck::bytes_of(v)),
                UniformValue::Vec2(v) => bytes.extend_from_slice(bytemuck::cast_slice(&v.to_array())),
                UniformValue::Vec3(v) => bytes.extend_from_slice(bytemuck::cast_slice(&v.to_array())),
                UniformValue::Vec4(v) => bytes.extend_from_slice(bytemuck::cast_slice(&v.to_array())),
                UniformValue::Texture(slot) => bytes.extend_from_slice(bytemuck::bytes_of(slot)),
            }
        }
        bytes
    }
}
