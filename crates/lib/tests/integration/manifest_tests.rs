//! End-to-end manifest expansion, merge, and output.

use std::fs;
use std::path::Path;

use distkit_lib::depfile::{DepFile, OpenedFiles};
use distkit_lib::manifest::{
  Entry, ManifestError, RawItem, entries_to_json, expand_manifest, expand_manifest_file, fini_lines_to_entries,
  merge_entries, write_manifest,
};

use super::common::TestEnv;

#[test]
fn nested_manifests_merge_into_sorted_output() {
  let env = TestEnv::new();
  env.write_file("out/app", "app binary");
  env.write_file("out/libfoo.so", "foo");
  env.write_file("gen/libfoo.so", "foo");
  env.write_file(
    "libs.json",
    r#"[{"destination": "lib/libfoo.so", "source": "gen/libfoo.so"}]"#,
  );
  env.write_file(
    "top.json",
    r#"[
      {"destination": "lib/libfoo.so", "source": "out/libfoo.so", "label": null},
      {"destination": "bin/app", "source": "out/app", "label": "//src:app"},
      {"file": "libs.json", "label": "//src:libs"}
    ]"#,
  );

  let config = env.config();
  let mut opened = OpenedFiles::new();
  let entries = expand_manifest_file(Path::new("top.json"), None, &config, &mut opened).unwrap();
  let outcome = merge_entries(entries, &config, &mut opened).unwrap();

  assert!(outcome.is_clean(), "{}", outcome.error_text());
  assert_eq!(
    outcome.entries,
    vec![
      Entry::new("bin/app", "out/app", Some("//src:app")),
      Entry::new("lib/libfoo.so", "out/libfoo.so", Some("//src:libs")),
    ]
  );

  let depfile = DepFile::new("dist.json", &opened).render();
  for file in ["top.json", "libs.json", "out/libfoo.so", "gen/libfoo.so"] {
    assert!(depfile.contains(&*env.path(file).to_string_lossy()), "{depfile} lacks {file}");
  }
  assert!(!opened.contains(env.path("out/app")));
}

#[test]
fn duplicate_entries_keep_first_label() {
  let items: Vec<RawItem> = serde_json::from_str(
    r#"[{"destination":"bin/app","source":"/out/app","label":"t1"},
        {"destination":"bin/app","source":"/out/app","label":null}]"#,
  )
  .unwrap();

  let outcome = expand_manifest(&items, &Default::default(), &mut OpenedFiles::new()).unwrap();

  assert_eq!(outcome.error_text(), "");
  assert_eq!(outcome.entries, vec![Entry::new("bin/app", "/out/app", Some("t1"))]);
}

#[test]
fn conflicting_sources_block_publication() {
  let env = TestEnv::new();
  env.write_file("a/app", "one");
  env.write_file("b/app", "two");
  let items: Vec<RawItem> = serde_json::from_str(
    r#"[{"destination":"bin/app","source":"a/app"},
        {"destination":"bin/app","source":"b/app","label":"//b"}]"#,
  )
  .unwrap();

  let outcome = expand_manifest(&items, &env.config(), &mut OpenedFiles::new()).unwrap();
  let text = outcome.error_text();

  assert!(text.starts_with("ERROR: Conflicting distribution entries!\n"));
  assert!(text.contains("destination path: bin/app"));
  assert!(text.contains("source=a/app label=None"));
  assert!(text.contains("source=b/app label=//b"));
  assert!(matches!(outcome.into_result(), Err(ManifestError::Conflicts(_))));
}

#[test]
fn malformed_top_level_manifest_fails() {
  let env = TestEnv::new();
  env.write_file("top.json", "{not json");

  let err = expand_manifest_file(Path::new("top.json"), None, &env.config(), &mut OpenedFiles::new()).unwrap_err();
  assert!(matches!(err, ManifestError::Parse { .. }));
}

#[test]
fn fini_entries_merge_with_json_entries() {
  let fini = fini_lines_to_entries(["bin/app=out/app", "lib/x.so=out/x.so"], Some("//legacy")).unwrap();
  let mut entries = vec![Entry::new("bin/app", "out/app", None)];
  entries.extend(fini);

  let outcome = merge_entries(entries, &Default::default(), &mut OpenedFiles::new()).unwrap();

  assert!(outcome.is_clean());
  assert_eq!(outcome.entries[0], Entry::new("bin/app", "out/app", Some("//legacy")));
}

#[test]
fn written_manifest_is_stable_across_input_order() {
  let env = TestEnv::new();
  let forward = vec![
    Entry::new("b", "s2", None),
    Entry::new("a", "s1", Some("//a")),
  ];
  let backward: Vec<Entry> = forward.iter().rev().cloned().collect();

  let first = merge_entries(forward, &Default::default(), &mut OpenedFiles::new()).unwrap();
  let second = merge_entries(backward, &Default::default(), &mut OpenedFiles::new()).unwrap();

  write_manifest(&env.path("one.json"), &first.entries).unwrap();
  write_manifest(&env.path("two.json"), &second.entries).unwrap();

  let one = fs::read_to_string(env.path("one.json")).unwrap();
  assert_eq!(one, fs::read_to_string(env.path("two.json")).unwrap());
  assert_eq!(one, entries_to_json(&first.entries).unwrap());
  assert!(env.root().join("one.json").exists());
}
