use blogdesk_api_types::{Category, Post, PostListResponse, Tag};

/// Payload held by a cache entry.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    PostPage(PostListResponse),
    Post(Post),
    Categories(Vec<Category>),
    Category(Category),
    Tags(Vec<Tag>),
    Tag(Tag),
}

/// Types that can be stored in and read back from the query cache.
pub trait Cacheable: Clone + Send + 'static {
    fn into_cached(self) -> CachedValue;
    fn from_cached(value: &CachedValue) -> Option<Self>;
}

macro_rules! cacheable {
    ($ty:ty => $variant:ident) => {
        impl Cacheable for $ty {
            fn into_cached(self) -> CachedValue {
                CachedValue::$variant(self)
            }

            fn from_cached(value: &CachedValue) -> Option<Self> {
                match value {
                    CachedValue::$variant(inner) => Some(inner.clone()),
                    _ => None,
                }
            }
        }
    };
}

cacheable!(PostListResponse => PostPage);
cacheable!(Post => Post);
cacheable!(Vec<Category> => Categories);
cacheable!(Category => Category);
cacheable!(Vec<Tag> => Tags);
cacheable!(Tag => Tag);
