//! Static member catalogs for the generic completion scopes.

use crate::analysis::BlockScope;
use buildscope_api::{CompletionEntry, CompletionKind};
use once_cell::sync::Lazy;

enum Row {
    Item(&'static str, &'static str, &'static str, CompletionKind),
    Snippet(&'static str, &'static str, &'static str),
}

use CompletionKind::{Method, Property};
use Row::{Item, Snippet};

// org.gradle.api.Project
const PROJECT: &[Row] = &[
    Item("buildDir", "buildDir", "Sets the build directory of this project.", Property),
    Item("description", "description", "Sets a description for this project.", Property),
    Item("group", "group", "Sets the group of this project.", Property),
    Item("version", "version", "Sets the version of this project.", Property),
    Item("status", "status", "Sets the status of this project.", Property),
    Item("defaultTasks", "defaultTasks", "Sets the names of the default tasks of this project.", Property),
    Snippet("buildDir(Closure closure)", "buildDir {\n  $0\n}", "Sets the build directory of this project."),
    Snippet("group(Closure closure)", "group {\n  $0\n}", "Sets the group of this project."),
    Snippet("version(Closure closure)", "version {\n  $0\n}", "Sets the version of this project."),
    Snippet("status(Closure closure)", "status {\n  $0\n}", "Sets the status of this project."),
    Snippet(
        "ant(Closure configureClosure)",
        "ant {\n  $0\n}",
        "Executes the given closure against the AntBuilder for this project.",
    ),
    Snippet(
        "configurations(Closure configureClosure)",
        "configurations {\n  $0\n}",
        "Configures the dependency configurations for this project.",
    ),
    Snippet(
        "artifacts(Closure configureClosure)",
        "artifacts {\n  $0\n}",
        "Configures the published artifacts for this project.",
    ),
    Snippet(
        "subprojects(Closure configureClosure)",
        "subprojects {\n  $0\n}",
        "Configures the sub-projects of this project.",
    ),
    Snippet(
        "allprojects(Closure configureClosure)",
        "allprojects {\n  $0\n}",
        "Configures this project and each of its sub-projects.",
    ),
    Snippet(
        "beforeEvaluate(Closure closure)",
        "beforeEvaluate {\n  $0\n}",
        "Adds a closure to be called immediately before this project is evaluated.",
    ),
    Snippet(
        "afterEvaluate(Closure closure)",
        "afterEvaluate {\n  $0\n}",
        "Adds a closure to be called immediately after this project has been evaluated.",
    ),
    Snippet(
        "repositories(Closure configureClosure)",
        "repositories {\n  $0\n}",
        "Configures the repositories for this project.",
    ),
    Snippet(
        "dependencies(Closure configureClosure)",
        "dependencies {\n  $0\n}",
        "Configures the dependencies for this project.",
    ),
    Snippet(
        "buildscript(Closure configureClosure)",
        "buildscript {\n  $0\n}",
        "Configures the build script classpath for this project.",
    ),
    Snippet("copy(Closure closure)", "copy {\n  $0\n}", "Copies the specified files."),
    Snippet(
        "copySpec(Closure closure)",
        "copySpec {\n  $0\n}",
        "Creates a CopySpec which can later be used to copy files or create an archive.",
    ),
    Snippet(
        "task(Closure closure)",
        "task {\n  $0\n}",
        "Creates a Task with the given name and adds it to this project.",
    ),
];

// org.gradle.api.artifacts.dsl.DependencyHandler
const DEPENDENCIES: &[Row] = &[
    Item("gradleApi()", "gradleApi()", "Creates a dependency on the API of the current version of Gradle.", Method),
    Item("gradleTestKit()", "gradleTestKit()", "Creates a dependency on the Gradle test-kit API.", Method),
    Item(
        "localGroovy()",
        "localGroovy()",
        "Creates a dependency on the Groovy that is distributed with the current version of Gradle.",
        Method,
    ),
    Snippet("api", "api \"$0\"", "Declares a dependency in api configuration."),
    Snippet("implementation", "implementation \"$0\"", "Declares a dependency in implementation configuration."),
    Snippet(
        "testImplementation",
        "testImplementation \"$0\"",
        "Declares a dependency in testImplementation configuration.",
    ),
    Snippet("compile", "compile \"$0\"", "Declares a dependency in compile configuration."),
    Snippet("compileClasspath", "compileClasspath \"$0\"", "Declares a dependency in compileClasspath configuration."),
    Snippet("compileOnly", "compileOnly \"$0\"", "Declares a dependency in compileOnly configuration."),
    Snippet("compileProtoPath", "compileProtoPath \"$0\"", "Declares a dependency in compileProtoPath configuration."),
    Snippet("testCompile", "testCompile \"$0\"", "Declares a dependency in testCompile configuration."),
    Snippet(
        "testCompileClasspath",
        "testCompileClasspath \"$0\"",
        "Declares a dependency in testCompileClasspath configuration.",
    ),
    Snippet("testCompileOnly", "testCompileOnly \"$0\"", "Declares a dependency in testCompileOnly configuration."),
    Snippet(
        "testCompileProtoPath",
        "testCompileProtoPath \"$0\"",
        "Declares a dependency in testCompileProtoPath configuration.",
    ),
    Snippet("runtime", "runtime \"$0\"", "Declares a dependency in runtime configuration."),
    Snippet("runtimeClasspath", "runtimeClasspath \"$0\"", "Declares a dependency in runtimeClasspath configuration."),
    Snippet("runtimeOnly", "runtimeOnly \"$0\"", "Declares a dependency in runtimeOnly configuration."),
    Snippet("testRuntime", "testRuntime \"$0\"", "Declares a dependency in testRuntime configuration."),
    Snippet(
        "testRuntimeClasspath",
        "testRuntimeClasspath \"$0\"",
        "Declares a dependency in testRuntimeClasspath configuration.",
    ),
    Snippet("testRuntimeOnly", "testRuntimeOnly \"$0\"", "Declares a dependency in testRuntimeOnly configuration."),
];

// org.gradle.api.artifacts.dsl.RepositoryHandler
const REPOSITORIES: &[Row] = &[
    Item(
        "gradlePluginPortal()",
        "gradlePluginPortal()",
        "Adds a repository which looks in Gradle Central Plugin Repository for dependencies.",
        Method,
    ),
    Item(
        "jcenter()",
        "jcenter()",
        "Adds a repository which looks in Bintray's JCenter repository for dependencies.",
        Method,
    ),
    Item(
        "mavenCentral()",
        "mavenCentral()",
        "Adds a repository which looks in the Maven central repository for dependencies.",
        Method,
    ),
    Item(
        "mavenLocal()",
        "mavenLocal()",
        "Adds a repository which looks in the local Maven cache for dependencies.",
        Method,
    ),
    Item(
        "google()",
        "google()",
        "Adds a repository which looks in Google's Maven repository for dependencies.",
        Method,
    ),
    Snippet(
        "flatDir(Closure configureClosure)",
        "flatDir {$0}",
        "Adds and configures a repository which will look for dependencies in a number of local directories.",
    ),
    Snippet("maven(Closure closure)", "maven {$0}", "Adds and configures a Maven repository."),
    Snippet("ivy(Closure closure)", "ivy {$0}", "Adds and configures an Ivy repository."),
];

// org.gradle.api.DefaultTask
const TASK: &[Row] = &[
    Item(
        "actions",
        "actions",
        "Sets the sequence of Action objects which will be executed by this task.",
        Property,
    ),
    Item("description", "description", "Sets a description for this task.", Property),
    Item("dependsOn", "dependsOn", "Sets the dependencies of this task.", Property),
    Item("didWork", "didWork", "Sets whether the task actually did any work.", Property),
    Item("enabled", "enabled", "Set the enabled state of a task.", Property),
    Item("finalizedBy", "finalizedBy", "Specifies the set of finalizer tasks for this task.", Property),
    Item("group", "group", "Sets the task group which this task belongs to.", Property),
    Item(
        "mustRunAfter",
        "mustRunAfter",
        "Specifies the set of tasks that this task must run after.",
        Property,
    ),
    Item("onlyIf", "onlyIf", "Execute the task only if the given closure returns true.", Property),
    Item("property", "property", "Sets a property of this task.", Property),
    Item(
        "shouldRunAfter",
        "shouldRunAfter",
        "Specifies the set of tasks that this task should run after.",
        Property,
    ),
    Snippet(
        "configure(Closure closure)",
        "configure {$0}",
        "Applies the statements of the closure against this task object.",
    ),
    Snippet(
        "doFirst(Closure closure)",
        "doFirst {$0}",
        "Adds the given closure to the beginning of this task's action list.",
    ),
    Snippet(
        "doLast(Closure closure)",
        "doLast {$0}",
        "Adds the given closure to the end of this task's action list.",
    ),
];

fn entries(rows: &[Row]) -> Vec<CompletionEntry> {
    rows.iter()
        .map(|row| match *row {
            Item(label, insert, detail, kind) => CompletionEntry::plain(label, insert, detail, kind),
            Snippet(label, insert, detail) => CompletionEntry::snippet(label, insert, detail),
        })
        .collect()
}

static PROJECT_ENTRIES: Lazy<Vec<CompletionEntry>> = Lazy::new(|| entries(PROJECT));
static DEPENDENCY_ENTRIES: Lazy<Vec<CompletionEntry>> = Lazy::new(|| entries(DEPENDENCIES));
static REPOSITORY_ENTRIES: Lazy<Vec<CompletionEntry>> = Lazy::new(|| entries(REPOSITORIES));
static TASK_ENTRIES: Lazy<Vec<CompletionEntry>> = Lazy::new(|| entries(TASK));

/// Members offered inside a block of the given scope.
pub fn catalog(scope: BlockScope) -> &'static [CompletionEntry] {
    match scope {
        BlockScope::Project => &PROJECT_ENTRIES,
        BlockScope::Dependencies => &DEPENDENCY_ENTRIES,
        BlockScope::Repositories => &REPOSITORY_ENTRIES,
        BlockScope::Task => &TASK_ENTRIES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn snippets_use_snippet_kind() {
        for scope in [
            BlockScope::Project,
            BlockScope::Dependencies,
            BlockScope::Repositories,
            BlockScope::Task,
        ] {
            for entry in catalog(scope) {
                assert_eq!(entry.snippet, entry.kind == CompletionKind::Snippet, "{}", entry.label);
                assert!(entry.insert_text.is_some());
            }
        }
    }

    #[test]
    fn repository_labels_are_unique() {
        let labels: HashSet<_> = catalog(BlockScope::Repositories).iter().map(|e| &e.label).collect();
        assert_eq!(labels.len(), catalog(BlockScope::Repositories).len());
        assert!(labels.contains(&"mavenCentral()".to_string()));
    }

    #[test]
    fn dependency_configurations_insert_a_quoted_tab_stop() {
        let implementation = catalog(BlockScope::Dependencies)
            .iter()
            .find(|e| e.label == "implementation")
            .unwrap();
        assert_eq!(implementation.insert_text.as_deref(), Some("implementation \"$0\""));
    }
}
