use std::collections::BTreeSet;

use crate::domain::models::{file::FileType, user::User};

pub const DEFAULT_SORT: &str = "$createdAt-desc";

/// Record fields the builder may filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileField {
    Id,
    Name,
    Type,
    Extension,
    Size,
    Owner,
    SharedUsers,
    CreatedAt,
}

impl FileField {
    /// Resolves a caller-supplied sort key. Adapters decide what to do with
    /// keys that resolve to nothing.
    pub fn from_sort_key(key: &str) -> Option<FileField> {
        match key {
            "$id" | "id" => Some(FileField::Id),
            "name" => Some(FileField::Name),
            "type" => Some(FileField::Type),
            "extension" => Some(FileField::Extension),
            "size" => Some(FileField::Size),
            "owner" => Some(FileField::Owner),
            "$createdAt" | "createdAt" | "created_at" => Some(FileField::CreatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Equals(FileField, String),
    /// Element membership for list fields, substring match for text fields.
    Contains(FileField, String),
    SetMembership(FileField, Vec<String>),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Passed through unvalidated.
    pub field: String,
    pub direction: SortDirection,
}

impl OrderBy {
    /// Splits `"<field>-<direction>"` on the last `-`. Anything other than an
    /// exact `asc` direction sorts descending.
    pub fn parse(sort: &str) -> Self {
        let (field, direction) = match sort.rsplit_once('-') {
            Some((field, "asc")) => (field, SortDirection::Asc),
            Some((field, _)) => (field, SortDirection::Desc),
            None => (sort, SortDirection::Desc),
        };

        Self {
            field: field.to_string(),
            direction,
        }
    }
}

/// Store-agnostic listing query. Always carries the access predicate; the
/// only way to obtain one is [`FileQueryBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileQuery {
    filter: Filter,
    order_by: OrderBy,
    limit: Option<u32>,
}

impl FileQuery {
    /// Conjunction of the access predicate and any optional filters.
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn order_by(&self) -> &OrderBy {
        &self.order_by
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }
}

pub struct FileQueryBuilder;

impl FileQueryBuilder {
    pub fn access_predicate(current_user: &User) -> Filter {
        Filter::Or(vec![
            Filter::Equals(FileField::Owner, current_user.id.clone()),
            Filter::Contains(
                FileField::SharedUsers,
                current_user.email.trim().to_lowercase(),
            ),
        ])
    }

    pub fn build(
        current_user: &User,
        types: &BTreeSet<FileType>,
        search_text: &str,
        sort: &str,
        limit: Option<u32>,
    ) -> FileQuery {
        let mut filters = vec![Self::access_predicate(current_user)];

        if !types.is_empty() {
            filters.push(Filter::SetMembership(
                FileField::Type,
                types.iter().map(|t| t.as_str().to_string()).collect(),
            ));
        }

        if !search_text.is_empty() {
            filters.push(Filter::Contains(FileField::Name, search_text.to_string()));
        }

        FileQuery {
            filter: Filter::And(filters),
            order_by: OrderBy::parse(sort),
            // Zero means no limit
            limit: limit.filter(|&n| n > 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "user-a".to_string(),
            email: "a@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn always_scopes_to_owner_or_shared() {
        let query = FileQueryBuilder::build(&user(), &BTreeSet::new(), "", "name-asc", None);

        assert_eq!(
            query.filter(),
            &Filter::And(vec![Filter::Or(vec![
                Filter::Equals(FileField::Owner, "user-a".to_string()),
                Filter::Contains(FileField::SharedUsers, "a@example.com".to_string()),
            ])])
        );
        assert_eq!(query.limit(), None);
    }

    #[test]
    fn zero_limit_is_unbounded() {
        let query = FileQueryBuilder::build(&user(), &BTreeSet::new(), "", "name-asc", Some(0));
        assert_eq!(query.limit(), None);
    }

    #[test]
    fn shared_email_is_matched_lowercased() {
        let mut mixed_case = user();
        mixed_case.email = "A@Example.com".to_string();

        let Filter::Or(access) = FileQueryBuilder::access_predicate(&mixed_case) else {
            panic!("expected a disjunction");
        };
        assert_eq!(
            access[1],
            Filter::Contains(FileField::SharedUsers, "a@example.com".to_string())
        );
    }

    #[test]
    fn adds_type_search_and_limit() {
        let types = BTreeSet::from([FileType::Video, FileType::Audio]);
        let query = FileQueryBuilder::build(&user(), &types, "Q3 Report", "size-asc", Some(10));

        let Filter::And(filters) = query.filter() else {
            panic!("expected a conjunction");
        };
        assert_eq!(filters.len(), 3);
        assert_eq!(
            filters[1],
            Filter::SetMembership(
                FileField::Type,
                vec!["video".to_string(), "audio".to_string()]
            )
        );
        assert_eq!(
            filters[2],
            Filter::Contains(FileField::Name, "Q3 Report".to_string())
        );
        assert_eq!(query.limit(), Some(10));
    }

    #[test]
    fn sort_direction_falls_back_to_descending() {
        assert_eq!(
            OrderBy::parse("name-asc"),
            OrderBy {
                field: "name".to_string(),
                direction: SortDirection::Asc
            }
        );
        assert_eq!(OrderBy::parse("name-xyz").direction, SortDirection::Desc);
        assert_eq!(OrderBy::parse("name-desc").direction, SortDirection::Desc);

        let bare = OrderBy::parse("name");
        assert_eq!(bare.field, "name");
        assert_eq!(bare.direction, SortDirection::Desc);
    }

    #[test]
    fn sort_splits_on_last_dash() {
        let order = OrderBy::parse("$created-at-asc");
        assert_eq!(order.field, "$created-at");
        assert_eq!(order.direction, SortDirection::Asc);
    }

    #[test]
    fn unknown_sort_fields_pass_through() {
        let query = FileQueryBuilder::build(&user(), &BTreeSet::new(), "", "colour-asc", None);
        assert_eq!(query.order_by().field, "colour");
        assert_eq!(FileField::from_sort_key("colour"), None);
    }
}
