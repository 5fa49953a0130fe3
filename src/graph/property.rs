//! Property values and the per-entity property bag
//!
//! Property values form a closed set of variants so that equality, display
//! and the "previous value" reported on change are always well defined.
//! [`PropertyValue::Opaque`] is the escape hatch for host objects that do
//! not fit any of the data variants.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Insertion-ordered map of property values
pub type PropertyMap = IndexMap<String, PropertyValue, FxBuildHasher>;

/// Property value type supporting multiple data types
///
/// Supports:
/// - String
/// - Integer (i64)
/// - Float (f64)
/// - Boolean
/// - Array (Vec<PropertyValue>)
/// - Map (insertion-ordered String -> PropertyValue)
/// - Null (an explicitly stored absent marker)
/// - Opaque (arbitrary host object, compared by identity, never serialized)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Array(Vec<PropertyValue>),
    Map(PropertyMap),
    Null,
    #[serde(skip)]
    Opaque(OpaqueValue),
}

impl PropertyValue {
    /// Wrap an arbitrary value in the opaque escape hatch
    pub fn opaque<T: Any>(value: T) -> Self {
        PropertyValue::Opaque(OpaqueValue::new(value))
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get float value if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get boolean value if this is a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&PropertyMap> {
        match self {
            PropertyValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the wrapped host object if this is an opaque value of type `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            PropertyValue::Opaque(opaque) => opaque.downcast_ref(),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "String",
            PropertyValue::Integer(_) => "Integer",
            PropertyValue::Float(_) => "Float",
            PropertyValue::Boolean(_) => "Boolean",
            PropertyValue::Array(_) => "Array",
            PropertyValue::Map(_) => "Map",
            PropertyValue::Null => "Null",
            PropertyValue::Opaque(_) => "Opaque",
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "\"{}\"", s),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Array(arr) => {
                write!(f, "[")?;
                for (i, val) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, "]")
            }
            PropertyValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, val)?;
                }
                write!(f, "}}")
            }
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Opaque(opaque) => write!(f, "<{}>", opaque.type_name()),
        }
    }
}

// Convenience conversions
impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(arr: Vec<PropertyValue>) -> Self {
        PropertyValue::Array(arr)
    }
}

impl From<PropertyMap> for PropertyValue {
    fn from(map: PropertyMap) -> Self {
        PropertyValue::Map(map)
    }
}

impl From<OpaqueValue> for PropertyValue {
    fn from(opaque: OpaqueValue) -> Self {
        PropertyValue::Opaque(opaque)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropertyValue::Null, Into::into)
    }
}

/// Shared handle to an arbitrary host object stored as a property
///
/// Two opaque values are equal only when they point at the same allocation.
///
/// The graph owns its property values, so an object holding a strong
/// [`Node`](crate::Node) or [`Graph`](crate::Graph) handle forms a cycle and
/// keeps the graph alive forever. Store [`WeakNode`](crate::WeakNode) or
/// [`WeakGraph`](crate::WeakGraph) back-references instead.
#[derive(Clone)]
pub struct OpaqueValue {
    value: Rc<dyn Any>,
    type_name: &'static str,
}

impl OpaqueValue {
    pub fn new<T: Any>(value: T) -> Self {
        OpaqueValue {
            value: Rc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.value).downcast_ref::<T>()
    }

    /// Rust type name of the wrapped object, for diagnostics only
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.value), Rc::as_ptr(&other.value))
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OpaqueValue").field(&self.type_name).finish()
    }
}

/// Mutable key/value store attached to every node and relationship
///
/// Last write wins; keys keep their first insertion position.
#[derive(Debug, Clone, Default)]
pub(crate) struct PropertyBag {
    values: PropertyMap,
}

impl PropertyBag {
    /// Upsert a value, returning the one it replaced
    pub(crate) fn set(&mut self, key: String, value: PropertyValue) -> Option<PropertyValue> {
        self.values.insert(key, value)
    }

    pub(crate) fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Independent copy of every property
    pub(crate) fn snapshot(&self) -> PropertyMap {
        self.values.clone()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }
}
