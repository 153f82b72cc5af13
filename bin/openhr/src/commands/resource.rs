//! Generic resource CRUD commands.
//!
//! `openhr get cities`, `openhr create role --json ...`, etc.
//! Resource names map onto the shared descriptor types; every operation
//! runs through the same permission-gated store and dialog machinery.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use openhr_admin::{Role, SubscriptionPlan, User};
use openhr_core::{merge_patch, ClientError, Filter, Resource};
use openhr_masterdata::{
    BloodGroup, City, Country, DocumentType, EducationLevel, Gender, MaritalStatus,
    OrganizationType, Religion, State,
};
use openhr_recruit::{Candidate, Interview};
use openhr_store::{list_state, DialogController, ListState, SubmitOutcome};

use crate::commands::session::Session;
use crate::table::print_table;

pub struct ListOpts {
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
    pub page: usize,
    pub per_page: usize,
    pub json: bool,
}

/// Parse repeated `--filter key=value` arguments.
pub fn parse_filters(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| anyhow::anyhow!("Invalid filter \"{}\" (expected key=value).", pair))
        })
        .collect()
}

/// Map a singular/plural resource name to its canonical endpoint name.
fn canonical(resource: &str) -> Result<&'static str> {
    match resource.to_lowercase().as_str() {
        // Master data
        "country" | "countries" => Ok("countries"),
        "state" | "states" => Ok("states"),
        "city" | "cities" => Ok("cities"),
        "gender" | "genders" => Ok("genders"),
        "religion" | "religions" => Ok("religions"),
        "blood-group" | "blood-groups" | "bloodgroup" | "bloodgroups" => Ok("blood-groups"),
        "marital-status" | "marital-statuses" | "maritalstatus" | "maritalstatuses" => {
            Ok("marital-statuses")
        }
        "education-level" | "education-levels" | "educationlevel" | "educationlevels" => {
            Ok("education-levels")
        }
        "document-type" | "document-types" | "documenttype" | "documenttypes" => {
            Ok("document-types")
        }
        "organization-type" | "organization-types" | "organizationtype" | "organizationtypes" => {
            Ok("organization-types")
        }
        // Administration
        "user" | "users" => Ok("users"),
        "role" | "roles" => Ok("roles"),
        "subscription-plan" | "subscription-plans" | "plan" | "plans" => Ok("subscription-plans"),
        // Recruitment
        "candidate" | "candidates" => Ok("candidates"),
        "interview" | "interviews" => Ok("interviews"),
        _ => Err(anyhow::anyhow!("Unknown resource type: {}", resource)),
    }
}

/// Monomorphize a handler over the named resource type.
macro_rules! dispatch {
    ($resource:expr, $handler:ident ( $($args:expr),* )) => {
        match canonical($resource)? {
            "countries" => $handler::<Country>($($args),*).await,
            "states" => $handler::<State>($($args),*).await,
            "cities" => $handler::<City>($($args),*).await,
            "genders" => $handler::<Gender>($($args),*).await,
            "religions" => $handler::<Religion>($($args),*).await,
            "blood-groups" => $handler::<BloodGroup>($($args),*).await,
            "marital-statuses" => $handler::<MaritalStatus>($($args),*).await,
            "education-levels" => $handler::<EducationLevel>($($args),*).await,
            "document-types" => $handler::<DocumentType>($($args),*).await,
            "organization-types" => $handler::<OrganizationType>($($args),*).await,
            "users" => $handler::<User>($($args),*).await,
            "roles" => $handler::<Role>($($args),*).await,
            "subscription-plans" => $handler::<SubscriptionPlan>($($args),*).await,
            "candidates" => $handler::<Candidate>($($args),*).await,
            "interviews" => $handler::<Interview>($($args),*).await,
            other => unreachable!("canonical() returned unmapped resource {}", other),
        }
    };
}

// ── Entry points ────────────────────────────────────────────────────

pub async fn list(resource: &str, opts: &ListOpts, config_path: &Path) -> Result<()> {
    dispatch!(resource, list_one(opts, config_path))
}

pub async fn get(resource: &str, id: &str, config_path: &Path) -> Result<()> {
    dispatch!(resource, get_one(id, config_path))
}

pub async fn create(resource: &str, body: &str, config_path: &Path) -> Result<()> {
    dispatch!(resource, create_one(body, config_path))
}

pub async fn update(resource: &str, id: &str, body: &str, config_path: &Path) -> Result<()> {
    dispatch!(resource, update_one(id, body, config_path))
}

pub async fn delete(resource: &str, id: &str, config_path: &Path) -> Result<()> {
    dispatch!(resource, delete_one(id, config_path))
}

// ── Generic handlers ────────────────────────────────────────────────

async fn list_one<R: Resource>(opts: &ListOpts, config_path: &Path) -> Result<()> {
    let session = Session::open(config_path)?;
    let store = session.store::<R>().await;
    store.set_page(opts.page, opts.per_page);

    let outcome = async {
        store.load().await?;

        let mut filter = Filter::search(opts.search.clone().unwrap_or_default());
        for (key, value) in &opts.filters {
            filter = filter.with(key.clone(), value.clone());
        }
        store.apply_filters(filter);
        Ok::<_, anyhow::Error>(())
    }
    .await;
    session.persist_tokens()?;
    outcome?;

    match list_state(store.as_ref()) {
        ListState::Rows(rows) => {
            if opts.json {
                let records: Vec<&R> = rows.iter().map(|r| &r.record).collect();
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                let mut headers: Vec<&str> = R::columns().to_vec();
                headers.push("LOCKED");
                let cells: Vec<Vec<String>> = rows
                    .iter()
                    .map(|r| {
                        let mut row = r.record.row();
                        row.push(if r.protected.is_some() { "yes" } else { "" }.to_string());
                        row
                    })
                    .collect();
                print_table(&headers, &cells);
                if let Some(p) = store.pagination() {
                    eprintln!("page {}/{} ({} total)", p.page, p.total_pages, p.total);
                }
            }
        }
        ListState::Empty => println!("No {} found.", R::PLURAL),
        ListState::NoMatches => println!("No {} match the current filter.", R::PLURAL),
        ListState::AccessDenied | ListState::Resolving | ListState::Loading => {
            anyhow::bail!("You do not have access to {}.", R::PLURAL)
        }
    }
    Ok(())
}

async fn get_one<R: Resource>(id: &str, config_path: &Path) -> Result<()> {
    let session = Session::open(config_path)?;
    let store = session.store::<R>().await;

    let record = store.get(id).await;
    session.persist_tokens()?;

    println!("{}", serde_json::to_string_pretty(&record?)?);
    Ok(())
}

async fn create_one<R: Resource>(body: &str, config_path: &Path) -> Result<()> {
    let session = Session::open(config_path)?;
    let store = session.store::<R>().await;

    let dialog = DialogController::new(Arc::clone(&store));
    let outcome = async {
        dialog.open_create()?;
        dialog.set_draft(parse_draft::<R>(body, R::Draft::default())?);
        Ok::<_, anyhow::Error>(dialog.submit().await)
    }
    .await;
    session.persist_tokens()?;

    finish_submit::<R>(&dialog, outcome?)
}

async fn update_one<R: Resource>(id: &str, body: &str, config_path: &Path) -> Result<()> {
    let session = Session::open(config_path)?;
    let store = session.store::<R>().await;

    let dialog = DialogController::new(Arc::clone(&store));
    let outcome = async {
        // Seed from a fresh fetch, then lay the user's patch over it.
        dialog.open_edit(id).await?;
        let seeded = dialog
            .draft()
            .ok_or_else(|| anyhow::anyhow!("Edit dialog failed to open."))?;
        dialog.set_draft(parse_draft::<R>(body, seeded)?);
        Ok::<_, anyhow::Error>(dialog.submit().await)
    }
    .await;
    session.persist_tokens()?;

    finish_submit::<R>(&dialog, outcome?)
}

async fn delete_one<R: Resource>(id: &str, config_path: &Path) -> Result<()> {
    let session = Session::open(config_path)?;
    let store = session.store::<R>().await;

    // Confirmation already happened in main. The store's own protected
    // check works off its loaded collection, which a one-shot CLI never
    // fills — so fetch the record and short-circuit here before any
    // DELETE goes out.
    let result = async {
        let record = store.get(id).await?;
        if let Some(reason) = record.protected() {
            return Err(ClientError::Protected(reason));
        }
        store.delete(id).await
    }
    .await;
    session.persist_tokens()?;
    result?;
    Ok(())
}

/// Merge a user-supplied JSON body over a base draft.
fn parse_draft<R: Resource>(body: &str, base: R::Draft) -> Result<R::Draft> {
    let patch: serde_json::Value =
        serde_json::from_str(body).map_err(|e| anyhow::anyhow!("Invalid JSON: {}", e))?;
    let mut value = serde_json::to_value(&base)?;
    merge_patch(&mut value, &patch);
    serde_json::from_value(value).map_err(|e| anyhow::anyhow!("Invalid {} draft: {}", R::SINGULAR, e))
}

/// Render the submit outcome for a terminal user.
fn finish_submit<R: Resource>(dialog: &DialogController<R>, outcome: SubmitOutcome) -> Result<()> {
    match outcome {
        SubmitOutcome::Completed => Ok(()),
        SubmitOutcome::Invalid => {
            for error in dialog.field_errors() {
                eprintln!("  {}", error);
            }
            anyhow::bail!("Validation failed; nothing was submitted.")
        }
        SubmitOutcome::Failed => anyhow::bail!(
            "{}",
            dialog
                .error_message()
                .unwrap_or_else(|| "The request could not be completed.".to_string())
        ),
        SubmitOutcome::Ignored => anyhow::bail!("Nothing to submit."),
    }
}

/// STATUS — check server health for the current context.
pub async fn status(config_path: &Path) -> Result<()> {
    let session = Session::open(config_path)?;

    match session.client.health().await {
        Ok(()) => println!("Status:    connected"),
        Err(err) => println!("Status:    unreachable ({})", err),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_aliases() {
        assert_eq!(canonical("Country").unwrap(), "countries");
        assert_eq!(canonical("bloodgroups").unwrap(), "blood-groups");
        assert_eq!(canonical("plan").unwrap(), "subscription-plans");
        assert!(canonical("spaceships").is_err());
    }

    #[test]
    fn test_parse_filters() {
        let parsed = parse_filters(&["isActive=true".into(), "countryId=c1".into()]).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], ("isActive".into(), "true".into()));
        assert!(parse_filters(&["nonsense".into()]).is_err());
    }

    #[test]
    fn test_parse_draft_merges_over_base() {
        use openhr_masterdata::Country;

        let draft = parse_draft::<Country>(r#"{"name":"India","code":"IN"}"#, Default::default())
            .unwrap();
        assert_eq!(draft.name, "India");
        assert_eq!(draft.code, "IN");
        assert!(!draft.is_active);
    }
}
