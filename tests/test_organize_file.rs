//! Whole-file reorganization: top-level grouping and the safety guards.

use std::borrow::Cow;

use tidyts::{Configuration, organize_source};

#[test]
fn test_functions_and_variables_are_grouped() {
    let source = "function b() {\n\
                  \x20 return 2;\n\
                  }\n\
                  \n\
                  export function a() {\n\
                  \x20 return 1;\n\
                  }\n\
                  \n\
                  const v = 1;\n";
    let expected = "// #region Functions (2)\n\
                    \n\
                    export function a() {\n\
                    \x20 return 1;\n\
                    }\n\
                    \n\
                    function b() {\n\
                    \x20 return 2;\n\
                    }\n\
                    \n\
                    // #endregion Functions (2)\n\
                    \n\
                    // #region Variables (1)\n\
                    \n\
                    const v = 1;\n\
                    \n\
                    // #endregion Variables (1)\n";

    let organized = organize_source(source, &Configuration::default());
    assert_eq!(organized.as_ref(), expected);
}

#[test]
fn test_variables_keep_declaration_order() {
    // initializers may depend on earlier variables
    let source = "function f() {}\n\
                  function g() {}\n\
                  \n\
                  export const first = 1;\n\
                  const second = first + 1;\n";
    let organized = organize_source(source, &Configuration::default());
    let first = organized.find("const first").unwrap();
    let second = organized.find("const second").unwrap();
    assert!(first < second);
}

#[test]
fn test_imports_render_first_in_original_order() {
    let source = "import { z } from \"./z\";\n\
                  import { a } from \"./a\";\n\
                  \n\
                  function two() {}\n\
                  function one() {}\n";
    let organized = organize_source(source, &Configuration::default());
    let z = organized.find("from \"./z\"").unwrap();
    let a = organized.find("from \"./a\"").unwrap();
    assert!(z < a, "imports are not reordered");
    assert!(!organized.contains("// #region Imports"), "imports are not regioned");
    assert!(a < organized.find("// #region Functions (2)").unwrap());
}

#[test]
fn test_classes_sort_while_members_organize() {
    let source = "class B {\n\
                  \x20 z = 1;\n\
                  \x20 a = 2;\n\
                  }\n\
                  \n\
                  class A {\n\
                  \x20 q = 1;\n\
                  \x20 b = 2;\n\
                  }\n";
    let organized = organize_source(source, &Configuration::default());

    assert!(organized.contains("// #region Classes (2)"));
    let class_a = organized.find("class A {").unwrap();
    let class_b = organized.find("class B {").unwrap();
    assert!(class_a < class_b, "classes sort by name");

    // members of both containers organized in the same run
    let b = organized.find("public b = 2;").unwrap();
    let q = organized.find("public q = 1;").unwrap();
    assert!(class_a < b && b < q && q < class_b);
    let a = organized.find("public a = 2;").unwrap();
    let z = organized.find("public z = 1;").unwrap();
    assert!(class_b < a && a < z);
}

#[test]
fn test_single_function_file_is_left_alone() {
    let source = "function only() {\n\x20 return 1;\n}\n";
    let organized = organize_source(source, &Configuration::default());
    assert_eq!(organized.as_ref(), source);
}

#[test]
fn test_top_level_expressions_disable_the_whole_file_pass() {
    let source = "console.log(\"boot\");\n\
                  \n\
                  class C {\n\
                  \x20 public b(): void {}\n\
                  \x20 public a(): void {}\n\
                  }\n\
                  \n\
                  function helper() {}\n";
    let organized = organize_source(source, &Configuration::default());

    // top level untouched: the expression still comes first
    assert!(organized.starts_with("console.log(\"boot\");"));
    let class_pos = organized.find("class C {").unwrap();
    let helper_pos = organized.find("function helper()").unwrap();
    assert!(class_pos < helper_pos, "top-level order preserved");

    // but members were still organized
    let a = organized.find("public a(): void {}").unwrap();
    let b = organized.find("public b(): void {}").unwrap();
    assert!(a < b);
}

#[test]
fn test_unrecognized_top_level_construct_is_a_clean_no_op() {
    let source = "class C {\n  b = 1;\n  a = 2;\n}\n\nfor (const x of []) {\n  console.log(x);\n}\n";
    let organized = organize_source(source, &Configuration::default());
    assert!(matches!(organized, Cow::Borrowed(_)));
    assert_eq!(organized.as_ref(), source);
}

#[test]
fn test_opt_out_marker_is_a_clean_no_op() {
    let source = "// tidyts:ignore\nclass C {\n  b = 1;\n  a = 2;\n}\n";
    let organized = organize_source(source, &Configuration::default());
    assert!(matches!(organized, Cow::Borrowed(_)));
}

#[test]
fn test_generated_file_marker_is_a_clean_no_op() {
    let source = "// <auto-generated/>\nclass C {\n  b = 1;\n  a = 2;\n}\n";
    let organized = organize_source(source, &Configuration::default());
    assert!(matches!(organized, Cow::Borrowed(_)));
}

#[test]
fn test_trailing_file_comment_survives() {
    let source = "function b() {}\n\nfunction a() {}\n\n// end of file marker\n";
    let organized = organize_source(source, &Configuration::default());
    assert!(organized.contains("// end of file marker"));
}

#[test]
fn test_whole_file_reorganization_is_idempotent() {
    let source = "import { x } from \"./x\";\n\
                  \n\
                  function b() {\n\
                  \x20 return 2;\n\
                  }\n\
                  \n\
                  enum Color { Red }\n\
                  \n\
                  interface I {\n\
                  \x20 run(): void;\n\
                  \x20 readonly id: string;\n\
                  }\n\
                  \n\
                  class A {\n\
                  \x20 private q = 1;\n\
                  \x20 public b(): void {}\n\
                  }\n";
    let config = Configuration::default();
    let once = organize_source(source, &config).into_owned();
    let twice = organize_source(&once, &config).into_owned();
    assert_eq!(once, twice);
}

#[test]
fn test_type_aliases_sort_into_their_own_region() {
    let source = "type Zed = number;\ntype Alpha = string;\nfunction f() {}\n";
    let organized = organize_source(source, &Configuration::default());
    assert!(organized.contains("// #region Type aliases (2)"));
    let alpha = organized.find("type Alpha").unwrap();
    let zed = organized.find("type Zed").unwrap();
    assert!(alpha < zed);
}
