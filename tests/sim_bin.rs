use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "normal"])
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    let winner = v["winner"].as_str().expect("no winner");
    assert!(winner == "player1" || winner == "player2");
    assert_eq!(v["points"][winner], 3);
    assert_eq!(v["final"]["phase"], "Battle");
}

#[test]
fn sim_binary_rejects_unknown_difficulty() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "impossible"])
        .output()
        .expect("failed to run sim binary");
    assert!(!output.status.success());
}
