//! Arena ids for environment entities.
//!
//! Types, variables, functions, and scopes live in arenas owned by the
//! environment; the AST and the pipeline stages refer to them through these
//! copyable ids. They are defined here, below every stage, so the parser
//! can carry annotation slots without depending on the environment crate.

macro_rules! arena_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an id from a raw arena index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Get the raw arena index.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id! {
    /// Identifies a registered type in the environment.
    TypeId
}

arena_id! {
    /// Identifies a defined variable in the environment.
    VariableId
}

arena_id! {
    /// Identifies a defined function in the environment.
    FunctionId
}

arena_id! {
    /// Identifies a scope node in the environment's scope tree.
    ScopeId
}
