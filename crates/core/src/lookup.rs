//! Name-based lookup over any collection whose records expose a display name.

use crate::calendar::{CalendarEvent, Habit};
use crate::crm::{Contact, Project, Task};
use crate::files::FileItem;
use crate::finance::BankAccount;
use crate::goals::Goal;
use crate::notes::Note;

/// A record that humans (and the assistant) refer to by name.
pub trait Named {
    fn display_name(&self) -> &str;
}

/// Finds the record a human most likely meant by `query`.
///
/// Exact case-insensitive matches win over substring matches; within each
/// tier the first record in collection order is returned. A blank query
/// matches nothing.
pub fn find_by_name<'a, T: Named>(items: &'a [T], query: &str) -> Option<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    items
        .iter()
        .find(|item| item.display_name().to_lowercase() == needle)
        .or_else(|| {
            items
                .iter()
                .find(|item| item.display_name().to_lowercase().contains(&needle))
        })
}

macro_rules! impl_named {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl Named for $ty {
                fn display_name(&self) -> &str {
                    &self.$field
                }
            }
        )*
    };
}

impl_named!(
    Note => title,
    CalendarEvent => title,
    Habit => title,
    Contact => name,
    Project => title,
    Task => title,
    FileItem => name,
    BankAccount => bank_name,
    Goal => title,
);
