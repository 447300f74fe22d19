use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Strong typing for BookStack's numeric ids with phantom types
pub struct Id<T> {
    value: u64,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecycleBinMarker;

/// Type aliases for specific ID types
pub type BookId = Id<BookMarker>;
pub type PageId = Id<PageMarker>;
pub type ChapterId = Id<ChapterMarker>;
pub type ShelfId = Id<ShelfMarker>;
pub type AttachmentId = Id<AttachmentMarker>;
pub type CommentId = Id<CommentMarker>;
pub type UserId = Id<UserMarker>;
pub type RecycleBinItemId = Id<RecycleBinMarker>;

impl<T> Id<T> {
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    pub const fn get(&self) -> u64 {
        self.value
    }

    /// The id as a URL path segment, used wherever a slug is unavailable.
    pub fn as_segment(&self) -> String {
        self.value.to_string()
    }
}

// Manual impls so the marker type does not need to implement these traits.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u64::deserialize(deserializer)?;
        Ok(Self::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_integers() {
        let id = BookId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: PageId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed.get(), 7);
    }

    #[test]
    fn ids_render_as_path_segments() {
        assert_eq!(ChapterId::new(12).as_segment(), "12");
        assert_eq!(ShelfId::new(3).to_string(), "3");
    }
}
