use assert_cmd::Command;

use ibmprep::geo_3d::Point;
use ibmprep::ibc::{new_record, IbcType, ImagePoint, RecordName};
use ibmprep::tree::{ElementBlock, Node, NodeValue};

fn temp_path(name: &str) -> String {
    std::env::temp_dir().join(name).to_string_lossy().to_string()
}

fn stdout_of(args: &[&str]) -> String {
    let output = Command::cargo_bin("ibmprep").unwrap().args(args).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn missing_subcommand_prints_usage() {
    let output = Command::cargo_bin("ibmprep").unwrap().output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Usage: ibmprep [OPTIONS] <COMMAND>"));
    for command in ["run", "example", "far-field"] {
        assert!(stderr.contains(command), "{} missing from usage", command);
    }
}

#[test]
fn far_field_from_growth_factor() {
    let stdout = stdout_of(&["far-field", "--size-max", "10", "--snear", "0.1"]);
    assert_eq!(stdout, "dfar: 123\nlevels: 7\n");
}

#[test]
fn far_field_rejects_bad_spacing() {
    let output = Command::cargo_bin("ibmprep").unwrap()
        .args(["far-field", "--size-max", "10", "--snear", "-0.1", "--levels", "3"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr).unwrap().contains("! SIZING ERROR:"));
}

#[test]
fn example_recipes_parse_back() {
    let yaml = stdout_of(&["example"]);
    let cfg: ibmprep::case::CaseConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(cfg, ibmprep::case::CaseConfig::example());

    let json = stdout_of(&["example", "--format", "json"]);
    assert!(serde_json::from_str::<ibmprep::case::CaseConfig>(&json).is_ok());
}

#[test]
fn run_prepares_wall_records() {
    let points = vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0), Point::new(0.0, 1.0, 0.0)];
    let mut zone = Node::new_zone("nozzle", &points, &ElementBlock::triangles(&[[0, 1, 2]]));
    zone.add_child(new_record(&RecordName::new(ImagePoint::First, IbcType::Log, "inlet"), Some("inlet"), 4));
    let tree = Node::new_tree().with_child(Node::new_base("Base").with_child(zone));

    let tree_path = temp_path("ibmprep_cli_tree.json");
    let output_path = temp_path("ibmprep_cli_out.json");
    let recipe_path = temp_path("ibmprep_cli_case.yaml");
    ibmprep::io::save_tree(&tree, &tree_path).unwrap();
    let recipe = format!(
        concat!(
            "tree_path: {}\n",
            "output_path: {}\n",
            "steps:\n",
            "  - step: set_snear\n",
            "    value: 0.01\n",
            "  - step: migrate_ibc_type\n",
            "    old: 2\n",
            "    new: inj\n",
            "  - step: injection\n",
            "    family: inlet\n",
            "    condition:\n",
            "      total_pressure: 2.0e5\n",
            "      direction: [0.0, 1.0, 0.0]\n",
        ),
        tree_path, output_path,
    );
    ibmprep::io::write_to_file(&recipe_path, &recipe).unwrap();

    let stdout = stdout_of(&["run", &recipe_path, "--log-level", "warn"]);
    assert_eq!(stdout, "1 zones written\n");

    let result = ibmprep::io::load_tree(&output_path).unwrap();
    let zone = result.require_zone("nozzle").unwrap();
    assert!(zone.child("IBCD_2_inlet").is_none());
    let record = zone.require_child("IBCD_5_inlet").unwrap();
    let field = |name: &str| record.require_child(name).unwrap().value.clone();
    assert_eq!(field("StagnationPressure"), NodeValue::Reals(vec![2.0e5; 4]));
    assert_eq!(field("StagnationEnthalpy"), NodeValue::Reals(vec![3.0e5; 4]));
    assert_eq!(field("diry"), NodeValue::Reals(vec![1.0; 4]));
    assert!(record.child("utau").is_none());

    let snear = &zone.require_child(".Solver#define").unwrap().require_child("snear").unwrap().value;
    assert_eq!(*snear, NodeValue::Real(0.01));
}

#[test]
fn run_reports_missing_recipe() {
    let output = Command::cargo_bin("ibmprep").unwrap()
        .args(["run", "no/such/case.yaml"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("! CASE ERROR:"));
    assert!(stderr.contains("no/such/case.yaml"));
}
