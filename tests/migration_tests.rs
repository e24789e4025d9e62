use pretty_assertions::assert_eq;
use sitemig::io::report::render;
use sitemig::{ChangeKind, MigrationConfig, Migrator, ReportFormat};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONCEPTS_TOC: &str = r#"
bigheader: "Concepts"
abstract: "Detailed explanations of Kubernetes system concepts and abstractions."
landing_page: /docs/concepts/
toc:
- docs/concepts/index.md
- title: Overview
  landing_page: /docs/concepts/overview/
  section:
  - docs/concepts/overview/what-is.md
  - docs/concepts/overview/not-written-yet.md
"#;

const POD_TERM: &str = r#"
name: Pod
id: pod
full-link: /docs/concepts/workloads/pods/pod-overview/
tags:
- core-object
- fundamental
short-description: >
  The smallest and simplest Kubernetes object.
long-description: >
  A Pod represents a set of running containers on your cluster.
"#;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

/// A small legacy site with one of everything the migration touches
fn legacy_site() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(root, "docs/home/index.md", "---\ntitle: Home\nlayout: docsportal\n---\nWelcome\n");
    write(root, "docs/reference/index.md", "---\ntitle: Reference\n---\n");
    write(root, "docs/reference/glossary.md", "---\ntitle: Glossary\n---\n");
    write(root, "docs/reference/generated/kubectl.html", "<h1>kubectl</h1>\n");
    write(root, "docs/concepts/index.md", "---\ntitle: Concepts\n---\n");
    write(
        root,
        "docs/concepts/overview/what-is.md",
        "---\ntitle: What is\n---\nIntro {% glossary_tooltip text=\"pods\" term_id=\"pod\" %}.\n\nBe careful.\n{: .caution}\n\nDone.\n",
    );
    write(
        root,
        "docs/tutorials/basics.md",
        "---\ntitle: Basics\n---\n{% include templates/tutorial.md %}\n{% capture overview %}\nLearn.\n{% endcapture %}\n",
    );
    write(root, "docs/legacy/index.md", "---\ntitle: Legacy\n---\n");
    write(root, "blog/index.html", "---\ntitle: Blog\n---\n");
    write(
        root,
        "blog/_posts/2015-07-02-hello.md",
        "---\ntitle: Hello\ndate: Friday, July 02, 2015\n---\nHi\n",
    );
    write(root, "blog/_posts/2016-01-01-iso.md", "---\ndate: 2016-01-01\n---\n");
    write(root, "data/concepts.yml", CONCEPTS_TOC);
    write(root, "data/glossary/pod.yml", POD_TERM);
    write(root, "data/glossary/_example.yml", "name: Example\n");
    write(root, "work/content/en/docs/extra.md", "---\ntitle: Extra\n---\n");

    temp_dir
}

#[test]
fn test_full_migration() {
    let site = legacy_site();
    let root = site.path();

    let migrator = Migrator::new(MigrationConfig::default(), root, false).unwrap();
    let report = migrator.run().unwrap();

    assert_eq!(
        read(root, "content/en/docs/home/_index.md"),
        "---\ntitle: Home\nlayout: docsportal_home\nlinkTitle: \"Home\"\nmain_menu: true\nweight: 20\ntoc_hide: true\n---\nWelcome\n"
    );
    assert_eq!(
        read(root, "content/en/docs/reference/_index.md"),
        "---\ntitle: Reference\nlinkTitle: \"Reference\"\nmain_menu: true\nweight: 70\ntoc_hide: true\n---\n"
    );
    assert_eq!(
        read(root, "content/en/docs/concepts/_index.md"),
        "---\ntitle: Concepts\nmain_menu: true\nweight: 40\n---\n"
    );
    assert_eq!(
        read(root, "content/en/docs/concepts/overview/_index.md"),
        "---\ntitle: \"Overview\"\nweight: 20\n---\n\n"
    );
    assert_eq!(
        read(root, "content/en/docs/concepts/overview/what-is.md"),
        "---\ntitle: What is\nweight: 10\n---\nIntro {{< glossary_tooltip text=\"pods\" term_id=\"pod\" >}}.\n\n{{< caution >}}\nBe careful.\n{{< /caution >}}\n\nDone.\n"
    );
    assert_eq!(
        read(root, "content/en/docs/tutorials/basics.md"),
        "---\ntitle: Basics\ncontent_template: templates/tutorial\n---\n\n{{% capture overview %}}\nLearn.\n{{% /capture %}}\n"
    );
    assert_eq!(
        read(root, "content/en/docs/legacy/_index.md"),
        "---\ntitle: Legacy\ntoc_hide: true\n---\n"
    );

    // layout moves
    assert!(root.join("static/reference/generated/kubectl.html").exists());
    assert!(!root.join("content/en/docs/reference/generated").exists());
    assert!(!root.join("content/en/docs/reference/glossary.md").exists());
    assert_eq!(read(root, "content/en/blog/_index.md"), "---\ntitle: Blog\n---\n");
    assert_eq!(read(root, "content/en/docs/extra.md"), "---\ntitle: Extra\n---\n");

    // glossary bundle
    let glossary = root.join("content/en/docs/reference/glossary");
    assert!(read(root, "content/en/docs/reference/glossary/index.md").contains("layout: glossary\n"));
    assert!(!glossary.join("_example.md").exists());
    assert!(read(root, "content/en/docs/reference/glossary/pod.md")
        .starts_with("---\ntitle: Pod\nid: pod\ndate: 2018-04-12\n"));

    // blog dates
    assert_eq!(
        read(root, "content/en/blog/_posts/2015-07-02-hello.md"),
        "---\ntitle: Hello\ndate: 2015-07-02\n---\nHi\n"
    );
    assert_eq!(
        read(root, "content/en/blog/_posts/2016-01-01-iso.md"),
        "---\ndate: 2016-01-01\n---\n"
    );

    // setup, tasks and tutorials have no section index; one blog date is not long-form
    let mut failed: Vec<(String, String)> = report
        .failures
        .iter()
        .map(|f| {
            let rel = f.path.strip_prefix(migrator.workspace().root()).unwrap();
            (rel.display().to_string(), f.fixer.clone())
        })
        .collect();
    failed.sort();
    assert_eq!(
        failed,
        vec![
            ("content/en/blog/_posts/2016-01-01-iso.md".to_string(), "dates".to_string()),
            ("content/en/docs/setup/_index.md".to_string(), "add main menu".to_string()),
            ("content/en/docs/tasks/_index.md".to_string(), "add main menu".to_string()),
            ("content/en/docs/tutorials/_index.md".to_string(), "add main menu".to_string()),
        ]
    );
}

#[test]
fn test_sources_are_left_alone() {
    let site = legacy_site();
    let root = site.path();

    Migrator::new(MigrationConfig::default(), root, false)
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(
        read(root, "docs/home/index.md"),
        "---\ntitle: Home\nlayout: docsportal\n---\nWelcome\n"
    );
    assert!(root.join("docs/reference/glossary.md").exists());
}

#[test]
fn test_rerun_starts_fresh() {
    let site = legacy_site();
    let root = site.path();

    let migrator = Migrator::new(MigrationConfig::default(), root, false).unwrap();
    migrator.run().unwrap();
    let first = read(root, "content/en/docs/home/_index.md");
    migrator.run().unwrap();

    assert_eq!(read(root, "content/en/docs/home/_index.md"), first);
}

#[test]
fn test_dry_run_writes_nothing() {
    let site = legacy_site();
    let root = site.path();

    let migrator = Migrator::new(MigrationConfig::default(), root, true).unwrap();
    let report = migrator.run().unwrap();

    assert!(!root.join("content").exists());
    assert!(!root.join("static").exists());
    assert_eq!(
        read(root, "docs/home/index.md"),
        "---\ntitle: Home\nlayout: docsportal\n---\nWelcome\n"
    );

    let copies: Vec<_> = report
        .changes
        .iter()
        .filter(|c| c.kind == ChangeKind::Copy)
        .map(|c| c.to.strip_prefix(migrator.workspace().root()).unwrap().to_path_buf())
        .collect();
    assert!(copies.contains(&Path::new("content/en/docs").to_path_buf()));
    assert!(copies.contains(&Path::new("content/en/blog").to_path_buf()));
    assert!(report
        .changes
        .iter()
        .any(|c| c.kind == ChangeKind::Create && c.to.ends_with("glossary/pod.md")));

    let table = render(&report, migrator.workspace().root(), ReportFormat::Table).unwrap();
    assert!(table.lines().any(|line| line.contains("docs") && line.ends_with("content/en/docs")));
}

#[test]
fn test_non_utf8_page_does_not_stop_the_run() {
    let site = legacy_site();
    let root = site.path();
    fs::create_dir_all(root.join("docs/concepts/overview")).unwrap();
    fs::write(root.join("docs/concepts/overview/latin1.md"), b"---\ntitle: Caf\xe9\n---\n").unwrap();

    let migrator = Migrator::new(MigrationConfig::default(), root, false).unwrap();
    let report = migrator.run().unwrap();

    assert!(report
        .failures
        .iter()
        .any(|f| f.path.ends_with("latin1.md") && f.error.contains("UTF-8")));
    assert_eq!(
        fs::read(root.join("content/en/docs/concepts/overview/latin1.md")).unwrap(),
        b"---\ntitle: Caf\xe9\n---\n"
    );
    assert!(read(root, "content/en/docs/concepts/overview/what-is.md").contains("{{< caution >}}"));
}

#[test]
fn test_missing_glossary_data_is_fatal() {
    let site = legacy_site();
    let root = site.path();
    fs::remove_dir_all(root.join("data/glossary")).unwrap();

    let result = Migrator::new(MigrationConfig::default(), root, false)
        .unwrap()
        .run();
    assert!(result.is_err());
}

#[test]
fn test_invalid_config_is_rejected() {
    let site = legacy_site();
    let config = MigrationConfig {
        content_pattern: "[".to_string(),
        ..Default::default()
    };
    assert!(Migrator::new(config, site.path(), false).is_err());
}
