//! Closure checks across several binaries sharing one visited set.

use std::path::Path;

use distkit_lib::needed::{LibraryMap, VisitedLibraries, verify_elf_dependencies};

fn instrumented_runtime() -> LibraryMap {
  // ld.so.1 <-> asan runtime, c++abi <-> asan runtime, unwind -> asan runtime
  let mut libs = LibraryMap::new();
  libs.insert("lib/ld.so.1", ["libzircon.so", "libclang_rt.asan.so"]);
  libs.insert("lib/libclang_rt.asan.so", ["libc.so", "libc++abi.so", "libzircon.so"]);
  libs.insert("lib/libc++abi.so", ["libc.so", "libclang_rt.asan.so", "libunwind.so"]);
  libs.insert("lib/libunwind.so", ["libc.so", "libclang_rt.asan.so"]);
  libs
}

#[test]
fn cyclic_runtime_closure_is_complete() {
  let mut libs = instrumented_runtime();
  let mut visited = VisitedLibraries::new();

  let missing = verify_elf_dependencies("bin/app", Path::new("lib"), ["libc.so", "libc++abi.so"], &mut libs, &mut visited);

  assert!(missing.is_empty(), "{missing:?}");
  let paths: Vec<_> = visited.iter().map(|p| p.to_string_lossy().into_owned()).collect();
  assert_eq!(
    paths,
    vec![
      "lib/ld.so.1",
      "lib/libc++abi.so",
      "lib/libclang_rt.asan.so",
      "lib/libunwind.so",
    ]
  );
}

#[test]
fn each_binary_gets_its_own_diagnostics() {
  let mut libs = instrumented_runtime();
  let mut visited = VisitedLibraries::new();

  let first = verify_elf_dependencies("bin/one", Path::new("lib"), ["libc.so", "libmissing.so"], &mut libs, &mut visited);
  let second = verify_elf_dependencies("bin/two", Path::new("lib"), ["libunwind.so", "libother.so"], &mut libs, &mut visited);

  let first: Vec<String> = first.iter().map(ToString::to_string).collect();
  let second: Vec<String> = second.iter().map(ToString::to_string).collect();
  assert_eq!(first, vec!["bin/one missing dependency lib/libmissing.so"]);
  assert_eq!(second, vec!["bin/two missing dependency lib/libother.so"]);
}
