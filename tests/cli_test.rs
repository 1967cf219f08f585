use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

fn member_import(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("member-import").unwrap();
    cmd.current_dir(temp_dir.path()).env_remove("BaseURL");
    cmd
}

#[test]
fn test_missing_base_url_exits_with_1() {
    let temp_dir = TempDir::new().unwrap();

    member_import(&temp_dir)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("BaseURL"));

    assert!(!temp_dir.path().join("logs").exists());
}

#[test]
fn test_unreadable_workbook_exits_with_1() {
    let temp_dir = TempDir::new().unwrap();

    member_import(&temp_dir)
        .env("BaseURL", "http://127.0.0.1:9")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Workbook error"));
}

#[test]
fn test_run_with_env_file_exits_with_0() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    std::fs::write(
        temp_dir.path().join(".env.uat"),
        format!("BaseURL={}\n", server.base_url()),
    )
    .unwrap();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "First Name").unwrap();
    worksheet.write_string(0, 1, "Email").unwrap();
    worksheet.write_string(1, 0, "Ann").unwrap();
    worksheet.write_string(1, 1, "ann@example.com").unwrap();
    worksheet.write_string(2, 0, "Bob").unwrap();
    workbook
        .save(temp_dir.path().join("import-members.xlsx"))
        .unwrap();

    let create_mock = server.mock(|when, then| {
        when.method(POST).path("/api/User/CreateUser");
        then.status(500).body("internal error");
    });

    // 單列失敗不影響結束碼
    member_import(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"));

    create_mock.assert_hits(1);

    let reports: Vec<_> = std::fs::read_dir(temp_dir.path().join("logs"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(reports.len(), 1);

    let report = std::fs::read_to_string(&reports[0]).unwrap();
    assert!(report.contains("2,ann@example.com,failed,,HTTP 500: internal error"));
    assert!(report.contains("3,,skipped,,Missing required fields: First Name or Email"));
}
