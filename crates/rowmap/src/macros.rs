//! Declarative registration of record members.

/// Implement [`Record`](crate::core::Record) for a struct by listing its
/// fields and the member names they are published under.
///
/// Every listed field becomes a writable member whose declared type is
/// derived from the field's Rust type through
/// [`FromValue`](crate::core::FromValue). Types needing read-only members
/// implement `Record` by hand.
///
/// ```rust
/// use rowmap::core::Record;
/// use uuid::Uuid;
///
/// #[derive(Debug, Default)]
/// pub struct Employee {
///     pub id: Uuid,
///     pub active: bool,
///     pub name: String,
///     pub manager: Option<Uuid>,
/// }
///
/// rowmap::impl_record!(Employee {
///     id => "Id",
///     active => "Active",
///     name => "Name",
///     manager => "ManagerId",
/// });
///
/// assert_eq!(Employee::members().len(), 4);
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $($field:ident => $name:literal),* $(,)? }) => {
        impl $crate::core::Record for $ty {
            fn members() -> ::std::vec::Vec<$crate::core::MemberDescriptor> {
                ::std::vec![
                    $($crate::core::MemberDescriptor::of($name, |r: &$ty| &r.$field)),*
                ]
            }

            fn assign(
                &mut self,
                member: &str,
                value: $crate::core::Value<'_>,
            ) -> ::std::result::Result<(), $crate::AssignError> {
                match member {
                    $($name => $crate::core::assign_into(&mut self.$field, value),)*
                    other => ::std::result::Result::Err(
                        $crate::AssignError::UnknownMember(other.to_string()),
                    ),
                }
            }
        }
    };
}
