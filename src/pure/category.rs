//! A bijective mapping between elements and a fixed set of categories
use crate::{Error, Result, Violation};
use std::{
    collections::{HashMap, HashSet},
    fmt,
    hash::Hash,
};

/// Tracks which of a fixed set of categories each element belongs to.
///
/// Every element is in exactly one category at a time: the forward index
/// (category to elements) and the reverse index (element to category) are
/// always kept in agreement. All of the single element operations are O(1).
///
/// The set of categories is fixed when the mapping is created. Elements are
/// added, moved and removed freely.
///
/// ```
/// # use smallwm::CategoryMapping;
/// let mut m: CategoryMapping<&str, u32> = CategoryMapping::new(["odd", "even"]);
///
/// m.add("odd", 1).unwrap();
/// m.add("odd", 2).unwrap();
/// m.move_to(&2, "even").unwrap();
///
/// assert_eq!(m.category_of(&2).unwrap(), &"even");
/// assert_eq!(m.count_of(&"odd").unwrap(), 1);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CategoryMapping<K, E>
where
    K: Clone + Eq + Hash,
    E: Clone + Eq + Hash,
{
    categories: Vec<K>,
    members: HashMap<K, HashSet<E>>,
    reverse: HashMap<E, K>,
}

impl<K, E> fmt::Debug for CategoryMapping<K, E>
where
    K: Clone + Eq + Hash + fmt::Debug,
    E: Clone + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.categories.iter().map(|k| (k, &self.members[k])))
            .finish()
    }
}

impl<K, E> CategoryMapping<K, E>
where
    K: Clone + Eq + Hash + fmt::Debug,
    E: Clone + Eq + Hash + fmt::Debug,
{
    /// Create a new, empty mapping over the given categories.
    ///
    /// Duplicate categories are collapsed into one.
    pub fn new<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut cats = Vec::new();
        let mut members = HashMap::new();

        for k in categories {
            if members.contains_key(&k) {
                continue;
            }
            members.insert(k.clone(), HashSet::new());
            cats.push(k);
        }

        Self {
            categories: cats,
            members,
            reverse: HashMap::new(),
        }
    }

    /// The categories known to this mapping in the order they were provided.
    pub fn categories(&self) -> &[K] {
        &self.categories
    }

    /// Whether or not `category` is one of the categories of this mapping.
    pub fn is_category(&self, category: &K) -> bool {
        self.members.contains_key(category)
    }

    /// Whether or not `element` is currently being tracked.
    pub fn contains(&self, element: &E) -> bool {
        self.reverse.contains_key(element)
    }

    /// The total number of tracked elements.
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    /// True if there are no tracked elements.
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// Iterate over all tracked elements along with the category they are in.
    /// No ordering is guaranteed.
    pub fn iter(&self) -> impl Iterator<Item = (&E, &K)> {
        self.reverse.iter()
    }

    /// Add a new element to the given category.
    ///
    /// # Errors
    /// Fails if the category is unknown or the element is already present in
    /// any category.
    pub fn add(&mut self, category: K, element: E) -> Result<()> {
        if self.contains(&element) {
            return Err(Violation::AlreadyTracked {
                element: format!("{element:?}"),
            }
            .into());
        }

        let set = self
            .members
            .get_mut(&category)
            .ok_or_else(|| Error::unknown_category(&category))?;

        set.insert(element.clone());
        self.reverse.insert(element, category);

        Ok(())
    }

    /// Remove an element from the mapping entirely, returning the category it
    /// was in.
    ///
    /// # Errors
    /// Fails if the element is not being tracked.
    pub fn remove(&mut self, element: &E) -> Result<K> {
        let category = self
            .reverse
            .remove(element)
            .ok_or_else(|| Error::unknown_client(element))?;

        if let Some(set) = self.members.get_mut(&category) {
            set.remove(element);
        }

        Ok(category)
    }

    /// Move an element from whatever category it is currently in to `category`.
    ///
    /// # Errors
    /// Fails if either the element or the target category is unknown. The
    /// mapping is left untouched on failure.
    pub fn move_to(&mut self, element: &E, category: K) -> Result<()> {
        if !self.is_category(&category) {
            return Err(Error::unknown_category(&category));
        }

        let current = self
            .reverse
            .get_mut(element)
            .ok_or_else(|| Error::unknown_client(element))?;
        let old = std::mem::replace(current, category.clone());

        if let Some(set) = self.members.get_mut(&old) {
            set.remove(element);
        }
        if let Some(set) = self.members.get_mut(&category) {
            set.insert(element.clone());
        }

        Ok(())
    }

    /// The category that `element` is currently in.
    ///
    /// # Errors
    /// Fails if the element is not being tracked.
    pub fn category_of(&self, element: &E) -> Result<&K> {
        self.reverse
            .get(element)
            .ok_or_else(|| Error::unknown_client(element))
    }

    /// The union of all elements currently in any of the given categories.
    ///
    /// # Errors
    /// Fails if any of the requested categories is unknown.
    pub fn elements_of<'a, I>(&self, categories: I) -> Result<HashSet<E>>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut elements = HashSet::new();

        for k in categories {
            let set = self
                .members
                .get(k)
                .ok_or_else(|| Error::unknown_category(k))?;
            elements.extend(set.iter().cloned());
        }

        Ok(elements)
    }

    /// A borrowed view of the elements in a single category.
    ///
    /// # Errors
    /// Fails if the category is unknown.
    pub fn members_of(&self, category: &K) -> Result<&HashSet<E>> {
        self.members
            .get(category)
            .ok_or_else(|| Error::unknown_category(category))
    }

    /// The number of elements currently in `category`.
    ///
    /// # Errors
    /// Fails if the category is unknown.
    pub fn count_of(&self, category: &K) -> Result<usize> {
        self.members_of(category).map(|s| s.len())
    }
}
