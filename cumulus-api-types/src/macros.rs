/// Implements the `kind` discriminator convention for an object type.
///
/// Every object carries a `kind` attribute which is either the full kind or
/// the link kind of the type. A link is the partial `{kind, id, href}` form
/// used when one payload references another object.
macro_rules! object_kind {
    ($ty:ident, $kind:literal, $link_kind:literal) => {
        impl $ty {
            /// The `kind` value of a full object.
            pub const KIND: &'static str = $kind;

            /// The `kind` value of a link to an object.
            pub const LINK_KIND: &'static str = $link_kind;

            /// Whether this object is only a link to the full resource.
            pub fn is_link(&self) -> bool {
                self.kind.as_deref() == Some(Self::LINK_KIND)
            }

            /// Create a link referencing the object with the given id.
            pub fn link(id: impl Into<String>) -> Self {
                Self {
                    kind: Some(Self::LINK_KIND.to_string()),
                    id: Some(id.into()),
                    ..Self::default()
                }
            }
        }
    };
}

pub(crate) use object_kind;
