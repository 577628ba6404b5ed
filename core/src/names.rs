//! Const-evaluable name sets.
//!
//! Rules that need two names to be *different* (duplicate tables in a join,
//! duplicate assigned columns, required insert columns) cannot be written as
//! trait bounds. They are checked on `&'static str` names during constant
//! evaluation instead, so a violation is still a compile error.

/// Maximum number of names a single set can hold.
pub const MAX_NAMES: usize = 64;

/// A fixed-capacity, ordered set of static names.
#[derive(Debug, Clone, Copy)]
pub struct NameSet {
    names: [&'static str; MAX_NAMES],
    len: usize,
}

/// Byte-wise string equality usable in const context.
pub const fn str_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

impl NameSet {
    pub const EMPTY: Self = Self {
        names: [""; MAX_NAMES],
        len: 0,
    };

    pub const fn of(names: &[&'static str]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < names.len() {
            set = set.with(names[i]);
            i += 1;
        }
        set
    }

    /// Appends `name`, keeping duplicates so they can be reported.
    pub const fn with(mut self, name: &'static str) -> Self {
        assert!(self.len < MAX_NAMES, "too many names in a single clause");
        self.names[self.len] = name;
        self.len += 1;
        self
    }

    pub const fn union(self, other: NameSet) -> Self {
        let mut set = self;
        let mut i = 0;
        while i < other.len {
            set = set.with(other.names[i]);
            i += 1;
        }
        set
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn get(&self, index: usize) -> Option<&'static str> {
        if index < self.len {
            Some(self.names[index])
        } else {
            None
        }
    }

    pub const fn contains(&self, name: &str) -> bool {
        let mut i = 0;
        while i < self.len {
            if str_eq(self.names[i], name) {
                return true;
            }
            i += 1;
        }
        false
    }

    pub const fn is_disjoint(&self, other: &NameSet) -> bool {
        let mut i = 0;
        while i < self.len {
            if other.contains(self.names[i]) {
                return false;
            }
            i += 1;
        }
        true
    }

    /// First name that occurs more than once.
    pub const fn first_duplicate(&self) -> Option<&'static str> {
        let mut i = 0;
        while i < self.len {
            let mut j = i + 1;
            while j < self.len {
                if str_eq(self.names[i], self.names[j]) {
                    return Some(self.names[i]);
                }
                j += 1;
            }
            i += 1;
        }
        None
    }

    pub const fn has_duplicates(&self) -> bool {
        self.first_duplicate().is_some()
    }

    /// Same names in the same order.
    pub const fn const_eq(&self, other: &NameSet) -> bool {
        if self.len != other.len {
            return false;
        }
        let mut i = 0;
        while i < self.len {
            if !str_eq(self.names[i], other.names[i]) {
                return false;
            }
            i += 1;
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names[..self.len].iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLES: NameSet = NameSet::of(&["tab_foo", "tab_bar"]);

    #[test]
    fn detects_duplicates() {
        assert!(!TABLES.has_duplicates());
        let dup = TABLES.with("tab_foo");
        assert_eq!(dup.first_duplicate(), Some("tab_foo"));
    }

    #[test]
    fn disjoint_and_union() {
        let other = NameSet::of(&["cte_x"]);
        assert!(TABLES.is_disjoint(&other));
        let all = TABLES.union(other);
        assert_eq!(all.len(), 3);
        assert!(!all.is_disjoint(&other));
        assert_eq!(all.iter().collect::<Vec<_>>(), ["tab_foo", "tab_bar", "cte_x"]);
    }

    #[test]
    fn ordered_equality() {
        assert!(TABLES.const_eq(&NameSet::of(&["tab_foo", "tab_bar"])));
        assert!(!TABLES.const_eq(&NameSet::of(&["tab_bar", "tab_foo"])));
        assert!(str_eq("id", "id"));
        assert!(!str_eq("id", "ids"));
    }
}
