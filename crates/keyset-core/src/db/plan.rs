use crate::{
    db::{
        Cursor, Keyset, SortSpec, cursor::cursor_for_row, order::OrderSpec, predicate::Predicate,
    },
    error::Error,
    model::FieldModel,
    traits::EntityKind,
};
use std::fmt;

///
/// PagePlan
///
/// Everything an adapter needs to fetch one cursor page: resolved sort,
/// key field, total ordering, and the filter (absent on the first page).
///

pub struct PagePlan<E: EntityKind> {
    pub sort: SortSpec<E>,
    pub key: &'static FieldModel<E>,
    pub order: OrderSpec,
    pub predicate: Option<Predicate>,
    pub cursor: Option<Cursor>,
}

impl<E: EntityKind> PagePlan<E> {
    #[must_use]
    pub const fn is_first_page(&self) -> bool {
        self.cursor.is_none()
    }

    /// Token for the page after `page`, which must be ordered by this plan.
    /// `Ok(None)` for an empty page.
    pub fn next_cursor(&self, page: &[E]) -> Result<Option<String>, Error> {
        let Some(last) = page.last() else {
            return Ok(None);
        };

        let cursor = cursor_for_row(last, self.key, Some(self.sort.field))?;

        Ok(Some(cursor.encode()))
    }
}

impl<E: EntityKind> fmt::Debug for PagePlan<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagePlan")
            .field("sort", &self.sort)
            .field("key", &self.key.name)
            .field("order", &self.order)
            .field("predicate", &self.predicate)
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl Keyset {
    /// Resolve a sort token and a cursor token into a page plan.
    ///
    /// An empty `sort_token` falls back to `default_sort`, or fails with
    /// `SortRequired` when there is none.
    pub fn plan<E: EntityKind>(
        &self,
        sort_token: &str,
        default_sort: Option<&str>,
        key_field: &str,
        cursor_token: Option<&str>,
    ) -> Result<PagePlan<E>, Error> {
        let sort = match default_sort {
            Some(default) => self.parse_sort_or::<E>(sort_token, default)?,
            None => self.parse_sort::<E>(sort_token)?,
        };
        let key = self.resolve_field::<E>(key_field)?;
        let cursor = self.decode_cursor(cursor_token)?;

        let order = self.build_ordering(&sort, key);
        let predicate = self.build_predicate(&sort, key, cursor.as_ref())?;

        Ok(PagePlan {
            sort,
            key,
            order,
            predicate,
            cursor,
        })
    }
}
