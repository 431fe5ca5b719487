use std::borrow::Cow;

use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

/// Represents a typed attribute value.
///
/// Only [`AttributeValue::String`] is escaped on output; the other variants are
/// written using their display form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value"))]
pub enum AttributeValue<'bump> {
    /// A string value.
    String(BumpString<'bump>),
    /// An integer value.
    Int(i128),
    /// A floating-point value.
    Float(f64),
    /// A boolean value.
    Bool(bool),
}

impl<'bump> AttributeValue<'bump> {
    /// Returns the value as a string slice if this is a String variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The text written between the quotes of the attribute.
    pub fn to_html(&self) -> Cow<'_, str> {
        match self {
            AttributeValue::String(s) => crate::util::escape(s.as_str()),
            AttributeValue::Int(i) => Cow::Owned(i.to_string()),
            AttributeValue::Float(f) => Cow::Owned(f.to_string()),
            AttributeValue::Bool(b) => Cow::Owned(b.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
/// A key-value pair for an HTML attribute.
///
/// A `None` value renders as a bare attribute (`<button disabled>`).
pub struct Attribute<'bump> {
    /// The key of the attribute.
    pub key: BumpString<'bump>,
    /// The value of the attribute.
    pub value: Option<AttributeValue<'bump>>,
}

impl<'bump> Attribute<'bump> {
    /// Create a new attribute with a string key and value.
    pub fn new(bump: &'bump Bump, key: &str, value: &str) -> Self {
        Attribute {
            key: BumpString::from_str_in(key, bump),
            value: Some(AttributeValue::String(BumpString::from_str_in(value, bump))),
        }
    }

    /// Create a boolean attribute (no value).
    pub fn boolean(bump: &'bump Bump, key: &str) -> Self {
        Attribute {
            key: BumpString::from_str_in(key, bump),
            value: None,
        }
    }

    /// Create an attribute from anything that converts into an optional value.
    pub fn with_value(bump: &'bump Bump, key: &str, value: impl IntoAttributeValue<'bump>) -> Self {
        Attribute {
            key: BumpString::from_str_in(key, bump),
            value: value.into_attribute_value(bump),
        }
    }

    /// Get the value as a string slice, if present and is a String variant.
    pub fn value_as_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(|v| v.as_str())
    }
}

/// Trait for types that can be used as the value of an [`Attribute`].
///
/// Returning `None` produces a bare attribute.
pub trait IntoAttributeValue<'bump> {
    /// Convert this value into an optional attribute value.
    fn into_attribute_value(self, bump: &'bump Bump) -> Option<AttributeValue<'bump>>;
}
impl<'bump> IntoAttributeValue<'bump> for AttributeValue<'bump> {
    fn into_attribute_value(self, _bump: &'bump Bump) -> Option<AttributeValue<'bump>> {
        Some(self)
    }
}
impl<'bump> IntoAttributeValue<'bump> for &str {
    fn into_attribute_value(self, bump: &'bump Bump) -> Option<AttributeValue<'bump>> {
        Some(AttributeValue::String(BumpString::from_str_in(self, bump)))
    }
}
impl<'bump> IntoAttributeValue<'bump> for String {
    fn into_attribute_value(self, bump: &'bump Bump) -> Option<AttributeValue<'bump>> {
        self.as_str().into_attribute_value(bump)
    }
}
impl<'bump> IntoAttributeValue<'bump> for &String {
    fn into_attribute_value(self, bump: &'bump Bump) -> Option<AttributeValue<'bump>> {
        self.as_str().into_attribute_value(bump)
    }
}
impl<'bump> IntoAttributeValue<'bump> for bool {
    fn into_attribute_value(self, _bump: &'bump Bump) -> Option<AttributeValue<'bump>> {
        Some(AttributeValue::Bool(self))
    }
}
impl<'bump, T: IntoAttributeValue<'bump>> IntoAttributeValue<'bump> for Option<T> {
    fn into_attribute_value(self, bump: &'bump Bump) -> Option<AttributeValue<'bump>> {
        self.and_then(|v| v.into_attribute_value(bump))
    }
}

macro_rules! int_attribute_values {
    ($($ty:ty),*) => {
        $(
            impl<'bump> IntoAttributeValue<'bump> for $ty {
                fn into_attribute_value(self, _bump: &'bump Bump) -> Option<AttributeValue<'bump>> {
                    Some(AttributeValue::Int(self as i128))
                }
            }
        )*
    };
}
int_attribute_values!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl<'bump> IntoAttributeValue<'bump> for f32 {
    fn into_attribute_value(self, _bump: &'bump Bump) -> Option<AttributeValue<'bump>> {
        Some(AttributeValue::Float(self as f64))
    }
}
impl<'bump> IntoAttributeValue<'bump> for f64 {
    fn into_attribute_value(self, _bump: &'bump Bump) -> Option<AttributeValue<'bump>> {
        Some(AttributeValue::Float(self))
    }
}

/// Trait for types that can be converted into an Attribute with a bump allocator.
pub trait IntoAttribute<'bump> {
    /// Convert this value into an Attribute using the given bump allocator.
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump>;
}
impl<'bump> IntoAttribute<'bump> for Attribute<'bump> {
    fn into_attribute(self, _bump: &'bump Bump) -> Attribute<'bump> {
        self
    }
}
impl<'bump> IntoAttribute<'bump> for &str {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::boolean(bump, self)
    }
}
impl<'bump, K: AsRef<str>, V: IntoAttributeValue<'bump>> IntoAttribute<'bump> for (K, V) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::with_value(bump, self.0.as_ref(), self.1)
    }
}

/// An insertion-ordered set of attributes with unique keys.
///
/// Inserting an existing key replaces its value but keeps its original position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Attributes<'bump> {
    entries: BumpVec<'bump, Attribute<'bump>>,
}
impl<'bump> Attributes<'bump> {
    /// Create an empty attribute set.
    pub fn new_in(bump: &'bump Bump) -> Self {
        Self {
            entries: BumpVec::new_in(bump),
        }
    }

    /// Insert an attribute, overwriting the value of an existing key in place.
    pub fn insert(&mut self, attribute: Attribute<'bump>) {
        match self
            .entries
            .iter_mut()
            .find(|a| a.key.as_str() == attribute.key.as_str())
        {
            Some(existing) => existing.value = attribute.value,
            None => self.entries.push(attribute),
        }
    }

    /// Merge `other` into this set; keys in `other` win.
    pub fn merge(&mut self, other: Attributes<'bump>) {
        for attribute in other.entries {
            self.insert(attribute);
        }
    }

    /// Look up the value of an attribute by key.
    ///
    /// The outer `Option` is whether the key exists; the inner is the value
    /// (which is `None` for bare attributes).
    pub fn get(&self, key: &str) -> Option<Option<&AttributeValue<'bump>>> {
        self.entries
            .iter()
            .find(|a| a.key.as_str() == key)
            .map(|a| a.value.as_ref())
    }

    /// The attribute at position `idx` in insertion order.
    pub fn get_index(&self, idx: usize) -> Option<&Attribute<'bump>> {
        self.entries.get(idx)
    }

    /// Iterate over the attributes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute<'bump>> {
        self.entries.iter()
    }

    /// The number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
impl<'bump> IntoIterator for Attributes<'bump> {
    type Item = Attribute<'bump>;
    type IntoIter = bumpalo::collections::vec::IntoIter<'bump, Attribute<'bump>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
impl<'a, 'bump> IntoIterator for &'a Attributes<'bump> {
    type Item = &'a Attribute<'bump>;
    type IntoIter = std::slice::Iter<'a, Attribute<'bump>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_insert_overwrites_in_place() {
        let bump = Bump::new();
        let mut attributes = Attributes::new_in(&bump);
        attributes.insert(Attribute::new(&bump, "id", "a"));
        attributes.insert(Attribute::new(&bump, "class", "b"));
        attributes.insert(Attribute::new(&bump, "id", "c"));

        let keys: Vec<_> = attributes.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, ["id", "class"]);
        assert_eq!(attributes.get("id").flatten().and_then(|v| v.as_str()), Some("c"));
    }

    #[test]
    fn attributes_are_indexed_in_insertion_order() {
        let bump = Bump::new();
        let mut attributes = Attributes::new_in(&bump);
        attributes.insert(Attribute::new(&bump, "id", "a"));
        attributes.insert(Attribute::boolean(&bump, "hidden"));
        assert_eq!(attributes.get_index(0), Some(&Attribute::new(&bump, "id", "a")));
        assert_eq!(attributes.get_index(1), Some(&Attribute::boolean(&bump, "hidden")));
        assert_eq!(attributes.get_index(2), None);
    }

    #[test]
    fn none_value_is_bare() {
        let bump = Bump::new();
        let attribute = ("disabled", None::<&str>).into_attribute(&bump);
        assert_eq!(attribute, Attribute::boolean(&bump, "disabled"));
    }

    #[test]
    fn non_string_values_are_not_escaped() {
        let bump = Bump::new();
        let attribute = ("tabindex", -1).into_attribute(&bump);
        assert_eq!(attribute.value.unwrap().to_html(), "-1");
        let attribute = ("title", "a<b").into_attribute(&bump);
        assert_eq!(attribute.value.unwrap().to_html(), "a&lt;b");
    }
}
