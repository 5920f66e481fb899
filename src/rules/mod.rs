//! Declarative selection rules.
//! Which corpus leaves are skipped for a given project, which generated files
//! are moved afterwards, and which fragments templates can pull in.
//!
//! Entries are logical paths (corpus-relative, `.templ` removed) without a
//! leading slash and are compared by exact equality. Tuning what gets
//! generated means editing the tables in [`SelectionRules::standard`].

use std::fmt;

use indexmap::{IndexMap, IndexSet};

use crate::model::{AppType, BackgroundJob, Billing, Database, ProjectModel};

pub mod fragments;
pub mod lint;

pub use fragments::{FragmentKind, FragmentTable};

/// Reason a corpus leaf was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionCategory {
    AppType(AppType),
    Database(Database),
    BackgroundJob(BackgroundJob),
    NoHtml,
    NoSmtp,
    NoStorage,
    NoAuth,
    NoRedis,
    NoBilling,
}

impl fmt::Display for ExclusionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionCategory::AppType(app_type) => write!(f, "app type {app_type}"),
            ExclusionCategory::Database(database) => write!(f, "database {database}"),
            ExclusionCategory::BackgroundJob(job) => write!(f, "background job {job}"),
            ExclusionCategory::NoHtml => f.write_str("no html"),
            ExclusionCategory::NoSmtp => f.write_str("no smtp"),
            ExclusionCategory::NoStorage => f.write_str("no storage"),
            ExclusionCategory::NoAuth => f.write_str("no auth"),
            ExclusionCategory::NoRedis => f.write_str("no redis"),
            ExclusionCategory::NoBilling => f.write_str("no billing"),
        }
    }
}

/// Normalises a rule entry to the logical path convention.
pub fn normalize_rule_path(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}

fn path_set(paths: &[&str]) -> IndexSet<String> {
    paths.iter().map(|p| normalize_rule_path(p)).collect()
}

/// Logical paths to skip, grouped by the condition that disables them.
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    pub by_app_type: IndexMap<AppType, IndexSet<String>>,
    pub by_database: IndexMap<Database, IndexSet<String>>,
    pub by_background_job: IndexMap<BackgroundJob, IndexSet<String>>,
    /// Applied when neither a web app nor `serve_html` asks for HTML assets.
    pub no_html: IndexSet<String>,
    pub no_smtp: IndexSet<String>,
    pub no_storage: IndexSet<String>,
    pub no_auth: IndexSet<String>,
    pub no_redis: IndexSet<String>,
    pub no_billing: IndexSet<String>,
}

impl Exclusions {
    /// Returns the first category that excludes `logical_path` for `model`.
    ///
    /// Categories are checked in a fixed order: app type, database,
    /// background job, then the disabled features.
    pub fn matching(&self, logical_path: &str, model: &ProjectModel) -> Option<ExclusionCategory> {
        let listed = |set: Option<&IndexSet<String>>| set.is_some_and(|s| s.contains(logical_path));

        if listed(self.by_app_type.get(&model.app_type())) {
            return Some(ExclusionCategory::AppType(model.app_type()));
        }
        if listed(self.by_database.get(&model.database())) {
            return Some(ExclusionCategory::Database(model.database()));
        }
        if listed(self.by_background_job.get(&model.background_job())) {
            return Some(ExclusionCategory::BackgroundJob(model.background_job()));
        }

        let disabled = [
            (!model.html(), &self.no_html, ExclusionCategory::NoHtml),
            (!model.smtp(), &self.no_smtp, ExclusionCategory::NoSmtp),
            (!model.storage(), &self.no_storage, ExclusionCategory::NoStorage),
            (!model.auth(), &self.no_auth, ExclusionCategory::NoAuth),
            (!model.redis(), &self.no_redis, ExclusionCategory::NoRedis),
            (model.billing() == Billing::None, &self.no_billing, ExclusionCategory::NoBilling),
        ];
        disabled
            .into_iter()
            .find(|(active, set, _)| *active && set.contains(logical_path))
            .map(|(_, _, category)| category)
    }

    /// Whether `logical_path` is skipped for every project without a database.
    ///
    /// Auth is always off without a database, so both the database-none and
    /// the no-auth lists apply.
    pub fn excluded_without_database(&self, logical_path: &str) -> bool {
        self.by_database.get(&Database::None).is_some_and(|s| s.contains(logical_path))
            || self.no_auth.contains(logical_path)
    }

    /// Every path mentioned by any exclusion list.
    pub fn all_paths(&self) -> IndexSet<&str> {
        self.by_app_type
            .values()
            .chain(self.by_database.values())
            .chain(self.by_background_job.values())
            .chain([
                &self.no_html,
                &self.no_smtp,
                &self.no_storage,
                &self.no_auth,
                &self.no_redis,
                &self.no_billing,
            ])
            .flat_map(|set| set.iter().map(String::as_str))
            .collect()
    }
}

/// The rule tables consulted by the materializer and the path rewriter.
#[derive(Debug, Clone, Default)]
pub struct SelectionRules {
    pub exclusions: Exclusions,
    /// Per app type `(old, new)` moves applied after materialization.
    pub renames: IndexMap<AppType, Vec<(String, String)>>,
}

const DATABASE_FILES: [&str; 13] = [
    "sqlc.yaml",
    "internal/database/database.go",
    "internal/database/migrate.go",
    "internal/database/migrations/00001_create_users.sql",
    "internal/database/migrations/00002_create_sessions.sql",
    "internal/database/migrations/00003_create_password_resets.sql",
    "internal/database/migrations/00004_create_email_verifications.sql",
    "internal/database/migrations/00005_create_api_tokens.sql",
    "internal/database/queries/users.sql",
    "internal/database/queries/sessions.sql",
    "internal/database/queries/tokens.sql",
    "internal/handler/user_handler.go",
    "internal/model/user.go",
];

const AUTH_FILES: [&str; 14] = [
    "internal/handler/auth_handler.go",
    "internal/middleware/auth.go",
    "internal/auth/password.go",
    "internal/auth/session.go",
    "internal/database/migrations/00002_create_sessions.sql",
    "internal/database/migrations/00003_create_password_resets.sql",
    "internal/database/migrations/00004_create_email_verifications.sql",
    "internal/database/migrations/00005_create_api_tokens.sql",
    "internal/database/queries/sessions.sql",
    "internal/database/queries/tokens.sql",
    "internal/mailer/templates/password_reset.html",
    "internal/mailer/templates/verify_email.html",
    "internal/html/templates/login.html",
    "internal/html/templates/signup.html",
];

const QUEUE_FILES: [&str; 5] = [
    "cmd/worker/main.go",
    "internal/queue/queue.go",
    "internal/queue/asynq.go",
    "internal/queue/sqs.go",
    "internal/queue/basic.go",
];

impl SelectionRules {
    /// The tables shipped with the bundled corpus.
    pub fn standard() -> Self {
        let mut by_app_type = IndexMap::new();
        by_app_type.insert(
            AppType::Api,
            path_set(&["internal/handler/routes_web.go", "internal/handler/home_handler.go"]),
        );
        by_app_type.insert(AppType::Web, path_set(&["internal/handler/routes_api.go"]));

        let mut by_database = IndexMap::new();
        by_database.insert(Database::None, path_set(&DATABASE_FILES));

        let mut by_background_job = IndexMap::new();
        by_background_job.insert(BackgroundJob::None, path_set(&QUEUE_FILES));
        by_background_job.insert(
            BackgroundJob::Sqs,
            path_set(&["internal/queue/asynq.go", "internal/queue/basic.go"]),
        );
        by_background_job.insert(
            BackgroundJob::Asynq,
            path_set(&["internal/queue/sqs.go", "internal/queue/basic.go"]),
        );
        by_background_job.insert(
            BackgroundJob::Basic,
            path_set(&["internal/queue/sqs.go", "internal/queue/asynq.go"]),
        );

        let exclusions = Exclusions {
            by_app_type,
            by_database,
            by_background_job,
            no_html: path_set(&[
                "internal/handler/static_handler.go",
                "internal/html/embed.go",
                "internal/html/static/css/app.css",
                "internal/html/templates/layout.html",
                "internal/html/templates/home.html",
                "internal/html/templates/login.html",
                "internal/html/templates/signup.html",
            ]),
            no_smtp: path_set(&[
                "internal/mailer/mailer.go",
                "internal/mailer/templates/welcome.html",
                "internal/mailer/templates/password_reset.html",
                "internal/mailer/templates/verify_email.html",
            ]),
            no_storage: path_set(&[
                "internal/storage/storage.go",
                "internal/storage/storage_s3.go",
                "internal/storage/storage_mock.go",
            ]),
            no_auth: path_set(&AUTH_FILES),
            no_redis: path_set(&["internal/redis/redis.go"]),
            no_billing: path_set(&[
                "internal/billing/stripe.go",
                "internal/handler/billing_handler.go",
            ]),
        };

        let mut renames = IndexMap::new();
        renames.insert(
            AppType::Api,
            vec![
                ("cmd/app/main.go".to_string(), "cmd/api/main.go".to_string()),
                (
                    "internal/handler/routes_api.go".to_string(),
                    "internal/handler/routes.go".to_string(),
                ),
            ],
        );
        renames.insert(
            AppType::Web,
            vec![
                ("cmd/app/main.go".to_string(), "cmd/web/main.go".to_string()),
                (
                    "internal/handler/routes_web.go".to_string(),
                    "internal/handler/routes.go".to_string(),
                ),
            ],
        );

        Self { exclusions, renames }
    }

    /// Returns the category that skips `logical_path`, if any.
    pub fn excluded(&self, logical_path: &str, model: &ProjectModel) -> Option<ExclusionCategory> {
        self.exclusions.matching(logical_path, model)
    }

    /// Rename pairs for an app type, empty when none are declared.
    pub fn renames_for(&self, app_type: AppType) -> &[(String, String)] {
        self.renames.get(&app_type).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn model(config: Config) -> ProjectModel {
        ProjectModel::from_config(&Config { name: "acme".to_string(), ..config }).unwrap()
    }

    #[test]
    fn test_normalize_rule_path() {
        assert_eq!(normalize_rule_path("/internal/x.go"), "internal/x.go");
        assert_eq!(normalize_rule_path("internal/x.go"), "internal/x.go");
    }

    #[test]
    fn test_first_matching_category_wins() {
        let rules = SelectionRules::standard();
        let model = model(Config { database: Database::None, ..Config::default() });
        // Listed for both database none and no auth; database is checked first.
        assert_eq!(
            rules.excluded("internal/database/queries/sessions.sql", &model),
            Some(ExclusionCategory::Database(Database::None))
        );
        assert_eq!(
            rules.excluded("internal/handler/auth_handler.go", &model),
            Some(ExclusionCategory::NoAuth)
        );
        assert_eq!(rules.excluded("README.md", &model), None);
    }

    #[test]
    fn test_exact_match_only() {
        let rules = SelectionRules::standard();
        let model = model(Config { storage: false, ..Config::default() });
        assert_eq!(
            rules.excluded("internal/storage/storage.go", &model),
            Some(ExclusionCategory::NoStorage)
        );
        assert_eq!(rules.excluded("internal/storage/storage.go.bak", &model), None);
        assert_eq!(rules.excluded("storage.go", &model), None);
    }

    #[test]
    fn test_serve_html_keeps_html_for_api() {
        let rules = SelectionRules::standard();
        let plain = model(Config::default());
        assert_eq!(
            rules.excluded("internal/html/embed.go", &plain),
            Some(ExclusionCategory::NoHtml)
        );
        let serving = model(Config { serve_html: true, ..Config::default() });
        assert_eq!(rules.excluded("internal/html/embed.go", &serving), None);
    }

    #[test]
    fn test_queue_backends_are_mutually_exclusive() {
        let rules = SelectionRules::standard();
        let asynq = model(Config { background_job: BackgroundJob::Asynq, ..Config::default() });
        assert_eq!(rules.excluded("internal/queue/asynq.go", &asynq), None);
        assert_eq!(rules.excluded("internal/queue/queue.go", &asynq), None);
        assert_eq!(rules.excluded("cmd/worker/main.go", &asynq), None);
        assert!(rules.excluded("internal/queue/sqs.go", &asynq).is_some());
        assert!(rules.excluded("internal/queue/basic.go", &asynq).is_some());
    }

    #[test]
    fn test_renames_for() {
        let rules = SelectionRules::standard();
        assert!(rules
            .renames_for(AppType::Web)
            .contains(&("cmd/app/main.go".to_string(), "cmd/web/main.go".to_string())));
        assert!(SelectionRules::default().renames_for(AppType::Api).is_empty());
    }
}
