//! A registry of [described] types.
//!
//! The registry is the explicit descriptor table of the system: descriptors
//! are reachable through [`Described::type_descriptor`] without it, but a
//! registry is what lets callers resolve a type from a string, e.g. when the
//! type to describe is named in a config file or a debug console.
//!
//! [described]: crate::Described

use std::any::TypeId;

use crate::Described;
use crate::hash::{HashMap, HashSet, TypeIdMap};
use crate::info::TypeDescriptor;

// -----------------------------------------------------------------------------
// TypeRegistry

/// A store of type descriptors indexed by [`TypeId`], full type path, and
/// bare type name.
///
/// [Registering] a type records its [`TypeDescriptor`]. Bare names are
/// convenient but not unique; when two registered types share one, the name
/// index drops the entry and the name is reported as [ambiguous].
///
/// # Example
///
/// ```
/// use describe::derive::Describe;
/// use describe::registry::TypeRegistry;
///
/// #[derive(Describe)]
/// struct Soldier {
///     rank: u8,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Soldier>();
///
/// let descriptor = registry.get_with_type_name("Soldier").unwrap();
/// assert_eq!(descriptor.field_len(), 1);
/// ```
///
/// [Registering]: TypeRegistry::register
/// [ambiguous]: TypeRegistry::is_ambiguous
pub struct TypeRegistry {
    descriptors: TypeIdMap<&'static TypeDescriptor>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            descriptors: TypeIdMap::new(),
            type_path_to_id: HashMap::default(),
            type_name_to_id: HashMap::default(),
            ambiguous_names: HashSet::default(),
        }
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(
        descriptor: &'static TypeDescriptor,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let ty = descriptor.ty();
        let type_name = ty.name();

        // A bare name shared by two types serves neither; drop it and
        // remember the ambiguity.
        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, ty.id());
            }
        }

        // For a new type, the full path cannot be duplicated.
        type_path_to_id.insert(ty.path(), ty.id());
    }

    /// Registers the type `T` if it has not been registered already.
    ///
    /// Repeated registrations are cheap no-ops; the first descriptor wins,
    /// which is harmless since descriptors are per-type singletons.
    pub fn register<T: Described>(&mut self) {
        let descriptor = T::type_descriptor();

        self.descriptors.try_insert(descriptor.ty_id(), || {
            Self::add_new_type_indices(
                descriptor,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            descriptor
        });
    }

    /// Registers the referenced type `T` if it has not been registered.
    ///
    /// See [`register`](TypeRegistry::register) for details.
    #[inline]
    pub fn register_by_val<T: Described>(&mut self, _: &T) {
        self.register::<T>();
    }

    /// Whether the type with the given [`TypeId`] has been registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.descriptors.contains(&type_id)
    }

    /// Returns the descriptor registered for the given [`TypeId`].
    ///
    /// If the type has not been registered, returns `None`.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static TypeDescriptor> {
        self.descriptors.get(&type_id).copied()
    }

    /// Returns the descriptor registered under the given full [type path].
    ///
    /// If no type with the given path has been registered, returns `None`.
    ///
    /// [type path]: crate::info::TypePath::type_path
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&'static TypeDescriptor> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the descriptor registered under the given bare [type name].
    ///
    /// If the name is ambiguous, or no type with the given name has been
    /// registered, returns `None`.
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&'static TypeDescriptor> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if the given bare [type name] matches multiple
    /// registered types.
    ///
    /// [type name]: crate::info::TypePath::type_name
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Returns an iterator over the registered descriptors.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static TypeDescriptor> {
        self.descriptors.values().copied()
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if nothing has been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Registers every type annotated with `#[describe(auto_register)]`.
    ///
    /// Equivalent to calling [`register`](Self::register) for each collected
    /// type. Repeated calls are cheap and insert no duplicates. Returns the
    /// number of collected registrations visited.
    ///
    /// Collection relies on the `inventory` crate; on platforms it does not
    /// support, the table is simply empty.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) -> usize {
        let mut visited = 0;
        for entry in inventory::iter::<AutoRegistration> {
            (entry.register)(self);
            visited += 1;
        }
        visited
    }
}

// -----------------------------------------------------------------------------
// AutoRegistration

/// One entry of the distributed registration table filled by
/// `#[describe(auto_register)]`.
#[cfg(feature = "auto_register")]
pub struct AutoRegistration {
    register: fn(&mut TypeRegistry),
}

#[cfg(feature = "auto_register")]
impl AutoRegistration {
    /// Creates the entry registering `T`.
    pub const fn of<T: Described>() -> Self {
        fn register_one<T: Described>(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }

        Self {
            register: register_one::<T>,
        }
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(AutoRegistration);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use super::TypeRegistry;
    use crate::derive::Describe;

    mod foo {
        use super::Describe;

        #[derive(Describe)]
        pub struct Twin {
            pub left: i32,
        }
    }

    mod bar {
        use super::Describe;

        #[derive(Describe)]
        pub struct Twin {
            pub right: i32,
        }
    }

    #[derive(Describe)]
    struct Lonely {
        value: u8,
    }

    #[test]
    fn lookup_by_id_path_and_name() {
        let mut registry = TypeRegistry::new();
        registry.register::<Lonely>();

        assert!(registry.contains(TypeId::of::<Lonely>()));
        assert_eq!(registry.len(), 1);

        let by_id = registry.get(TypeId::of::<Lonely>()).unwrap();
        let by_path = registry.get_with_type_path(by_id.type_path()).unwrap();
        let by_name = registry.get_with_type_name("Lonely").unwrap();

        assert_eq!(by_path.ty_id(), by_id.ty_id());
        assert_eq!(by_name.ty_id(), by_id.ty_id());
    }

    #[test]
    fn duplicate_bare_names_become_ambiguous() {
        let mut registry = TypeRegistry::new();
        registry.register::<foo::Twin>();
        registry.register::<bar::Twin>();

        assert!(registry.is_ambiguous("Twin"));
        assert!(registry.get_with_type_name("Twin").is_none());

        // Full paths keep working.
        assert!(
            registry
                .get_with_type_path(<foo::Twin as crate::info::TypePath>::type_path())
                .is_some()
        );
    }

    #[test]
    fn repeated_registration_is_a_no_op() {
        let mut registry = TypeRegistry::new();
        registry.register::<Lonely>();
        registry.register::<Lonely>();

        assert_eq!(registry.len(), 1);
    }

    #[cfg(feature = "auto_register")]
    #[derive(Describe)]
    #[describe(auto_register)]
    struct SelfAnnouncing {
        beacon: bool,
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_register_collects_annotated_types() {
        let mut registry = TypeRegistry::new();
        registry.auto_register();

        assert!(registry.contains(TypeId::of::<SelfAnnouncing>()));
    }
}
