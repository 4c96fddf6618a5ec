//! Package-level generation.
//!
//! [`Generator`] binds and emits every (resource type, language) pair of a
//! package on a pool of scoped worker threads. Jobs share no mutable state;
//! results are collected in any order and then sorted, so the report is the
//! same for any worker count.

use crate::binding::ResourceBinding;
use crate::builder::BindingBuilder;
use crate::emit::{self, DEFAULT_TOOL, GeneratedFile};
use crate::error::CodegenError;
use crate::naming::CollisionResolved;
use crate::rules::{Language, LanguageRules, RuleSet};
use crossbeam_channel::unbounded;
use ironbind_schema::{Package, SchemaError, SchemaErrorKind, SchemaPath};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::thread;

/// A successfully generated (resource type, language) pair.
#[derive(Debug, Clone)]
pub struct GeneratedResource {
    /// Declaration index of the resource type in its package.
    pub index: usize,
    /// The binding.
    pub binding: ResourceBinding,
    /// The emitted file.
    pub file: GeneratedFile,
}

impl GeneratedResource {
    /// Returns the type token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.binding.token
    }

    /// Returns the target language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.binding.language
    }
}

/// A resource type that could not be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    /// Declaration index of the resource type in its package.
    pub index: usize,
    /// Type token.
    pub token: String,
    /// Language the failure is specific to, or `None` for every language.
    pub language: Option<Language>,
    /// The schema error.
    pub error: SchemaError,
}

/// Outcome of a generator run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Generated pairs, sorted by (declaration index, language).
    pub resources: Vec<GeneratedResource>,
    /// Failures, sorted by (declaration index, language).
    pub failures: Vec<GenerationFailure>,
}

impl GenerationReport {
    /// Returns true if every resource type was generated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Iterates over the emitted files.
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.resources.iter().map(|r| &r.file)
    }

    /// Iterates over every rename performed in the run.
    pub fn collisions(&self) -> impl Iterator<Item = &CollisionResolved> {
        self.resources.iter().flat_map(|r| &r.binding.collisions)
    }

    /// Looks up the result for a token and language.
    #[must_use]
    pub fn get(&self, token: &str, language: Language) -> Option<&GeneratedResource> {
        self.resources
            .iter()
            .find(|r| r.token() == token && r.language() == language)
    }

    /// Writes every emitted file under `root`.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` on the first file that cannot be written.
    pub fn write_to(&self, root: &Path) -> Result<Vec<PathBuf>, CodegenError> {
        self.files().map(|file| file.write_to(root)).collect()
    }
}

/// Parallel binding and emission of a whole package.
#[derive(Debug, Clone)]
pub struct Generator {
    rules: RuleSet,
    workers: usize,
    languages: Option<Vec<Language>>,
    tool: String,
}

impl Generator {
    /// Creates a generator using the given rule set.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        let workers = thread::available_parallelism().map_or(1, usize::from);
        Self {
            rules,
            workers,
            languages: None,
            tool: DEFAULT_TOOL.to_string(),
        }
    }

    /// Sets the number of worker threads (at least one).
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Restricts generation to the given languages.
    ///
    /// By default every language of the rule set is generated.
    #[must_use]
    pub fn languages(mut self, languages: impl IntoIterator<Item = Language>) -> Self {
        let mut languages: Vec<_> = languages.into_iter().collect();
        languages.sort();
        languages.dedup();
        self.languages = Some(languages);
        self
    }

    /// Sets the tool name stamped into generated-file banners.
    #[must_use]
    pub fn tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Returns the rule set.
    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Generates every resource type of `package` for every language.
    ///
    /// Schema errors are local to one resource type and are recorded in
    /// [`GenerationReport::failures`]; the other resource types are still
    /// generated.
    ///
    /// # Errors
    /// Returns `CodegenError::Naming` if the rule set is invalid or cannot
    /// produce collision-free names. No partial report is returned then.
    pub fn generate(&self, package: &Package) -> Result<GenerationReport, CodegenError> {
        if let Err(err) = self.rules.validate() {
            tracing::error!(error = %err, "invalid naming rule set");
            return Err(err.into());
        }

        let languages = match &self.languages {
            Some(languages) => languages.clone(),
            None => self.rules.languages().collect(),
        };
        let rules = languages
            .iter()
            .map(|language| self.rules.get(*language).map(|rules| (*language, rules)))
            .collect::<Result<Vec<(Language, &LanguageRules)>, _>>()?;

        let mut failures = Vec::new();
        let mut seen = HashSet::new();
        let mut jobs = Vec::new();
        for (index, resource) in package.resources.iter().enumerate() {
            if !seen.insert(resource.token.as_str()) {
                failures.push(GenerationFailure {
                    index,
                    token: resource.token.clone(),
                    language: None,
                    error: SchemaError::new(
                        SchemaPath::resource(&resource.token),
                        SchemaErrorKind::DuplicateResource {
                            token: resource.token.clone(),
                        },
                    ),
                });
                continue;
            }
            for (language, language_rules) in &rules {
                jobs.push((index, *language, *language_rules));
            }
        }

        tracing::debug!(
            package = %package.name,
            jobs = jobs.len(),
            workers = self.workers,
            "dispatching generation jobs"
        );

        let mut results = self.run(package, jobs);
        results.sort_by_key(|(index, language, _)| (*index, *language));

        let mut resources = Vec::with_capacity(results.len());
        let mut fatal = None;
        for (index, language, result) in results {
            match result {
                Ok(generated) => resources.push(generated),
                Err(CodegenError::Schema(error)) => failures.push(GenerationFailure {
                    index,
                    token: package.resources[index].token.clone(),
                    language: Some(language),
                    error,
                }),
                Err(err) => {
                    if fatal.is_none() {
                        fatal = Some(err);
                    }
                }
            }
        }
        if let Some(err) = fatal {
            tracing::error!(package = %package.name, error = %err, "generation aborted");
            return Err(err);
        }

        let resources = reject_path_conflicts(resources, &mut failures);
        failures.sort_by_key(|f| (f.index, f.language));

        for failure in &failures {
            tracing::warn!(
                token = %failure.token,
                language = ?failure.language,
                error = %failure.error,
                "resource type skipped"
            );
        }

        Ok(GenerationReport {
            resources,
            failures,
        })
    }

    fn run(
        &self,
        package: &Package,
        jobs: Vec<(usize, Language, &LanguageRules)>,
    ) -> Vec<(usize, Language, Result<GeneratedResource, CodegenError>)> {
        let (job_tx, job_rx) = unbounded();
        let (result_tx, result_rx) = unbounded();
        let count = jobs.len();
        for job in jobs {
            // The receiver outlives this loop.
            let _ = job_tx.send(job);
        }
        drop(job_tx);

        thread::scope(|scope| {
            for _ in 0..self.workers.min(count.max(1)) {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    for (index, language, rules) in job_rx.iter() {
                        let resource = &package.resources[index];
                        let result = BindingBuilder::new(rules)
                            .build(package, resource)
                            .map(|binding| GeneratedResource {
                                index,
                                file: emit::emit_as(&binding, &self.tool),
                                binding,
                            });
                        if result_tx.send((index, language, result)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(result_tx);

        result_rx.iter().collect()
    }
}

/// Drops later resources whose output path is already taken.
///
/// Paths are compared case-insensitively so the output tree also works on
/// case-insensitive file systems.
fn reject_path_conflicts(
    resources: Vec<GeneratedResource>,
    failures: &mut Vec<GenerationFailure>,
) -> Vec<GeneratedResource> {
    let mut claimed: HashMap<String, String> = HashMap::new();
    let mut kept = Vec::with_capacity(resources.len());
    for resource in resources {
        let path = resource.file.path.to_string_lossy().to_string();
        let key = path.to_lowercase();
        match claimed.get(&key) {
            Some(existing) => failures.push(GenerationFailure {
                index: resource.index,
                token: resource.token().to_string(),
                language: Some(resource.language()),
                error: SchemaError::path_conflict(
                    SchemaPath::resource(resource.token()),
                    path,
                    existing.clone(),
                ),
            }),
            None => {
                claimed.insert(key, resource.token().to_string());
                kept.push(resource);
            }
        }
    }
    kept
}
