//! Catalog loading and the process-lifetime snapshot store.
//!
//! The store owns an immutable `Arc<Catalog>` snapshot: loaded lazily on
//! first access, shared by readers without further synchronization, and
//! replaced wholesale on reload. Readers never observe a partially built
//! catalog.
//!
//! A missing or corrupt source degrades to an empty catalog (evaluation then
//! reports every parameter as unknown) rather than failing the request.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use aquaguard_types::{Catalog, CatalogDocument};

pub struct CatalogStore {
    path: PathBuf,
    snapshot: RwLock<Option<Arc<Catalog>>>,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current snapshot, loading it from the source on first access.
    pub fn load(&self) -> Arc<Catalog> {
        if let Some(catalog) = self
            .snapshot
            .read()
            .expect("catalog lock should not be poisoned")
            .clone()
        {
            return catalog;
        }
        self.reload()
    }

    /// Rebuild the snapshot from the source and swap it in.
    ///
    /// The replacement is fully built before the write lock is taken, so
    /// concurrent readers keep the old snapshot until the swap completes.
    pub fn reload(&self) -> Arc<Catalog> {
        let catalog = Arc::new(read_catalog(&self.path));
        *self
            .snapshot
            .write()
            .expect("catalog lock should not be poisoned") = Some(catalog.clone());
        catalog
    }

    /// Human-readable version label of the current snapshot, or "" when the
    /// source carries no complete metadata.
    pub fn version_label(&self) -> String {
        self.load().version_label()
    }
}

/// Read and parse the catalog source, raising on any failure. Used by the
/// explicit `validate` path, where degrading would hide the problem.
pub fn read_document(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read catalog source '{}'", path.display()))?;
    let document: CatalogDocument = serde_json::from_str(&text)
        .with_context(|| format!("parse catalog source '{}'", path.display()))?;
    Ok(Catalog::from(document))
}

/// Read the catalog for evaluation, degrading to empty on failure.
fn read_catalog(path: &Path) -> Catalog {
    if !path.exists() {
        debug!(
            "catalog source '{}' not found; starting with an empty catalog",
            path.display()
        );
        return Catalog::default();
    }

    match read_document(path) {
        Ok(catalog) => {
            debug!(
                "loaded {} parameter(s) from '{}'",
                catalog.parameters.len(),
                path.display()
            );
            normalize(catalog)
        }
        Err(err) => {
            warn!(
                "failed to load catalog from '{}': {err:#}; continuing with an empty catalog",
                path.display()
            );
            Catalog::default()
        }
    }
}

/// Enforce the name invariant: empty names are dropped, and of duplicate
/// names the first occurrence wins.
fn normalize(mut catalog: Catalog) -> Catalog {
    let mut seen = HashSet::new();
    catalog.parameters.retain(|record| {
        if record.name.is_empty() {
            warn!("dropping catalog record with an empty name");
            return false;
        }
        if !seen.insert(record.name.clone()) {
            warn!("dropping duplicate catalog record '{}'", record.name);
            return false;
        }
        true
    });
    catalog
}

/// Catalog hygiene report for the explicit validation path: name-invariant
/// violations and fail-capable standards missing their advisory text.
pub fn lint_catalog(catalog: &Catalog) -> Vec<String> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (index, record) in catalog.parameters.iter().enumerate() {
        if record.name.is_empty() {
            issues.push(format!("parameter #{index}: empty name"));
            continue;
        }
        if !seen.insert(record.name.as_str()) {
            issues.push(format!("'{}': duplicate parameter name", record.name));
        }

        for standard in &record.standards {
            if standard.has_limit()
                && (standard.consequence.is_empty() || standard.solution.is_empty())
            {
                issues.push(format!(
                    "'{}' [{}]: fail-capable standard is missing consequence or solution text",
                    record.name, standard.authority
                ));
            }
        }
    }

    issues
}
