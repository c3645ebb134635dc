//! Previews a list page: reads saved records, applies list options through
//! the controller and prints the resulting page as JSON.
//!
//! Usage: `backoffice-tables <records.json> [sort=<key>] [order=asc|desc]
//! [size=<n>] [page=<n>] [search=<text>] [filter.<path>=<value>]`
//!
//! The records file is either a JSON array of rows or a saved search
//! response envelope (`{"success": .., "data": {"items": .., "total": ..}}`).

use std::env;
use std::fs;
use std::path::Path;
use std::process;

use dotenvy::dotenv;
use serde_json::Value;

use backoffice_tables::TableListController;
use backoffice_tables::domain::types::{PageSize, SortDirection};
use backoffice_tables::dto::api::{ApiResponse, SearchPage};
use backoffice_tables::dto::list::ListPageData;
use backoffice_tables::models::config::ListConfig;
use backoffice_tables::repository::InMemoryRepository;
use backoffice_tables::repository::errors::RepositoryError;
use backoffice_tables::services::ServiceResult;
use backoffice_tables::services::list::{load_list_page, page_from_response};

/// List options collected from the command line.
#[derive(Debug, Default)]
struct PreviewOptions {
    sort: Option<String>,
    order: Option<SortDirection>,
    size: Option<PageSize>,
    page: Option<usize>,
    search: Option<String>,
    filters: Vec<(String, String)>,
}

fn parse_options<I>(args: I) -> Result<PreviewOptions, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = PreviewOptions::default();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got `{arg}`"))?;
        match key {
            "sort" => options.sort = Some(value.to_string()),
            "order" => {
                let order = value.parse::<SortDirection>().map_err(|e| format!("{e}"))?;
                options.order = Some(order);
            }
            "size" => {
                let size = value
                    .parse::<usize>()
                    .map_err(|e| format!("invalid size `{value}`: {e}"))?;
                options.size = Some(PageSize::new(size).map_err(|e| format!("{e}"))?);
            }
            "page" => {
                let page = value
                    .parse::<usize>()
                    .map_err(|e| format!("invalid page `{value}`: {e}"))?;
                // pages are 1-based on the command line
                options.page = Some(page.saturating_sub(1));
            }
            "search" => options.search = Some(value.to_string()),
            _ => match key.strip_prefix("filter.") {
                Some(field) => options.filters.push((field.to_string(), value.to_string())),
                None => return Err(format!("unknown option `{key}`")),
            },
        }
    }
    Ok(options)
}

/// Rejects a page size the list does not offer.
fn check_page_size(options: &PreviewOptions, config: &ListConfig) -> Result<(), String> {
    match options.size {
        Some(size) if !config.page_size_options().contains(&size) => Err(format!(
            "page size {size} is not one of {:?}",
            config.page_size_options
        )),
        _ => Ok(()),
    }
}

/// Replays the options as the interactions a user would perform.
fn apply_options(controller: &mut TableListController, options: PreviewOptions) {
    if let Some(search) = options.search {
        controller.set_search(search);
    }
    for (field, value) in options.filters {
        controller.set_filter(field, value);
    }
    if let Some(sort) = options.sort {
        if sort != controller.order_by().as_str() {
            controller.request_sort(sort);
        }
    }
    // a second click on the active column flips the direction
    if let Some(order) = options.order {
        if order != controller.order() {
            let current = controller.order_by().clone();
            controller.request_sort(current);
        }
    }
    if let Some(size) = options.size {
        controller.change_page_size(size);
    }
    if let Some(page) = options.page {
        controller.change_page(page);
    }
}

fn load_page(
    raw: &str,
    controller: &TableListController,
    id_field: &str,
) -> ServiceResult<ListPageData> {
    let value: Value = serde_json::from_str(raw).map_err(RepositoryError::from)?;

    if value.is_object() {
        let response: ApiResponse<SearchPage> =
            serde_json::from_value(value).map_err(RepositoryError::from)?;
        // saved responses are already a single page; show it as is
        return page_from_response(response, controller, id_field);
    }

    let rows = match value {
        Value::Array(rows) => rows,
        other => vec![other],
    };
    let repo = InMemoryRepository::from_rows(rows, id_field)?;
    load_list_page(&repo, controller, id_field)
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".into());

    let list_config = match ListConfig::load(Path::new(&config_dir), &app_env) {
        Ok(list_config) => list_config,
        Err(err) => {
            log::error!("Error loading list config: {}", err);
            process::exit(1);
        }
    };

    let mut args = env::args().skip(1);
    let Some(records_path) = args.next() else {
        log::error!("Usage: backoffice-tables <records.json> [key=value ...]");
        process::exit(2);
    };

    let options = match parse_options(args)
        .and_then(|options| check_page_size(&options, &list_config).map(|()| options))
    {
        Ok(options) => options,
        Err(err) => {
            log::error!("Invalid arguments: {err}");
            process::exit(2);
        }
    };

    let mut controller = match TableListController::from_config(&list_config) {
        Ok(controller) => controller,
        Err(err) => {
            log::error!("Invalid list defaults: {err}");
            process::exit(1);
        }
    };
    apply_options(&mut controller, options);

    let raw = match fs::read_to_string(&records_path) {
        Ok(raw) => raw,
        Err(err) => {
            log::error!("Failed to read {records_path}: {err}");
            process::exit(1);
        }
    };

    let page = match load_page(&raw, &controller, &list_config.id_field) {
        Ok(page) => page,
        Err(err) => {
            log::error!("Failed to build page: {err}");
            process::exit(1);
        }
    };

    log::info!(
        "Page {} of {} ({} records, sorted by {} {})",
        page.rows.page_index.saturating_add(1),
        page.rows.total_pages.max(1),
        page.rows.total,
        controller.order_by(),
        controller.order()
    );

    match serde_json::to_string_pretty(&page) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Failed to render page: {err}");
            process::exit(1);
        }
    }
}
