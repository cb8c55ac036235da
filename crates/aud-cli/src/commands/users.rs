use aud_config::AuditConfig;
use aud_core::entities::UserAccount;
use aud_engine::query::{FilterSet, RoleFilter, SortDirection, filter, sort_by_date};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UsersArgs;
use crate::commands::shared::input::read_json;
use crate::commands::shared::limit::effective_limit;
use crate::output::output;

const DATE_FIELD: &str = "created_at";

#[derive(Debug, Serialize)]
struct UserListResponse<'a> {
    total: usize,
    matched: usize,
    users: Vec<&'a UserAccount>,
}

/// Handle `audt users`.
pub fn handle(args: &UsersArgs, config: &AuditConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let users: Vec<UserAccount> = read_json(&args.users, "users")?;
    let limit = effective_limit(flags.limit, config.general.default_limit);
    let response = list(&users, args, usize::try_from(limit)?);
    output(&response, flags.format)
}

fn list<'a>(users: &'a [UserAccount], args: &UsersArgs, limit: usize) -> UserListResponse<'a> {
    let filters = FilterSet {
        date_field: Some(DATE_FIELD.to_string()),
        from: args.from,
        to: args.to,
        role: args.role.as_deref().map(RoleFilter::parse).unwrap_or_default(),
        search: args.search.clone(),
        search_fields: vec!["name".to_string(), "email".to_string()],
    };

    let mut matched = filter(users, &filters);
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    sort_by_date(&mut matched, DATE_FIELD, direction);

    let total_matched = matched.len();
    matched.truncate(limit);

    UserListResponse {
        total: users.len(),
        matched: total_matched,
        users: matched,
    }
}
