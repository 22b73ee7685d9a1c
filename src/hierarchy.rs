//! Class hierarchy lookups
//!
//! Resolvers that register classes (commands, Livewire components, service
//! providers, view components) only accept files whose class derives from a
//! framework base class. The check goes through [`TypeHierarchy`] so the
//! host can supply its own knowledge of the class graph; the default is
//! assembled from the declarations found while scanning source trees.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::php::ClassDeclaration;

/// Answers "is `type_name` the same as, or a subtype of, `base`?"
///
/// Names are fully-qualified; a leading `\` is optional.
pub trait TypeHierarchy: Send + Sync {
    fn is_subtype(&self, type_name: &str, base: &str) -> bool;
}

/// Hierarchy built from scanned class declarations
///
/// Names compare case-insensitively, as PHP class names do. A parent that was
/// never scanned (e.g. `\Illuminate\Console\Command` living in `vendor/`) is
/// still a valid base: it just has no parents of its own.
#[derive(Debug, Clone, Default)]
pub struct ScannedHierarchy {
    parents: HashMap<String, Vec<String>>,
}

impl ScannedHierarchy {
    pub fn from_declarations<'a>(declarations: impl IntoIterator<Item = &'a ClassDeclaration>) -> Self {
        let mut hierarchy = Self::default();
        for declaration in declarations {
            hierarchy.add_declaration(declaration);
        }
        hierarchy
    }

    pub fn add_declaration(&mut self, declaration: &ClassDeclaration) {
        for parent in declaration.extends.iter().chain(&declaration.implements) {
            self.add_parent(&declaration.name, parent);
        }
    }

    /// Record that `type_name` extends or implements `parent`.
    pub fn add_parent(&mut self, type_name: &str, parent: &str) {
        let parents = self.parents.entry(normalize(type_name)).or_default();
        let parent = normalize(parent);
        if !parents.contains(&parent) {
            parents.push(parent);
        }
    }

    #[must_use]
    pub fn with_parent(mut self, type_name: &str, parent: &str) -> Self {
        self.add_parent(type_name, parent);
        self
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl TypeHierarchy for ScannedHierarchy {
    fn is_subtype(&self, type_name: &str, base: &str) -> bool {
        let target = normalize(base);
        let start = normalize(type_name);
        if start == target {
            return true;
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(&start);
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            for parent in self.parents.get(current).into_iter().flatten() {
                if *parent == target {
                    return true;
                }
                queue.push_back(parent);
            }
        }
        false
    }
}

fn normalize(name: &str) -> String {
    name.trim_start_matches('\\').to_lowercase()
}
