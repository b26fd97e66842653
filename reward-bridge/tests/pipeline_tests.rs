//! Integration tests for the regroup pipeline
//!
//! These tests run fetch → reshape → publish end to end over the mock tree
//! source and mock git writer.

use async_trait::async_trait;
use reward_bridge::{
    BranchTip, BridgeError, BridgeResult, GitStep, GitWriter, LocalTreeSource, MockGitWriter,
    MockTreeSource, RegroupPipeline, RepoCoordinate, RunConfig, TreeEntry, COMMIT_MESSAGE,
};
use reward_core::{MonthDirectory, SchemaVariant, TreeFile};
use serde_json::{json, Value};

fn config() -> RunConfig {
    RunConfig::new(RepoCoordinate::new("AuxoDAO", "rewards"), "main")
}

fn single_file(claims: Value) -> String {
    json!({
        "merkleRoot": "0x5f1c",
        "windowIndex": 0,
        "chainId": 1,
        "recipients": claims
    })
    .to_string()
}

fn dual_claim(account_index: u64, amount: &str, pro_rata: &str, tax: &str) -> Value {
    json!({
        "accountIndex": account_index,
        "amount": amount,
        "rewards": { "proRata": pro_rata, "redistributed": "0", "tax": tax },
        "windowIndex": 3,
        "proof": [format!("0x{:064x}", account_index)]
    })
}

fn dual_file(claims: Value) -> String {
    json!({
        "merkleRoot": "0xabcd",
        "windowIndex": 3,
        "recipients": claims
    })
    .to_string()
}

fn published(pipeline: &RegroupPipeline<MockTreeSource, MockGitWriter>, blob: &str) -> Value {
    let text = pipeline.writer().blob(blob).expect("blob stored");
    serde_json::from_str(&text).unwrap()
}

// ============ Single Schema ============

#[tokio::test]
async fn test_single_schema_example() {
    let months = vec![MonthDirectory::new(
        "2021-01",
        vec![TreeFile::text(
            "merkle-tree.json",
            single_file(json!({
                "0xAAA": {
                    "accountIndex": 0,
                    "amount": "100",
                    "metadata": { "reason": "x" },
                    "windowIndex": 0,
                    "proof": ["0x00"]
                }
            })),
        )],
    )];
    let pipeline = RegroupPipeline::new(
        MockTreeSource::new(months),
        MockGitWriter::with_branch("main"),
        config(),
    );

    let report = pipeline.run(SchemaVariant::Single).await.unwrap();

    assert_eq!(report.receipt.path, "reports/users.json");
    assert_eq!(
        published(&pipeline, &report.receipt.blob_sha),
        json!({
            "0xAAA": {
                "2021-01": {
                    "accountIndex": 0,
                    "amount": "100",
                    "metadata": { "reason": "x" },
                    "windowIndex": 0,
                    "proof": ["0x00"]
                }
            }
        })
    );
}

#[tokio::test]
async fn test_single_schema_across_months() {
    let claim = |index: u64, amount: &str| {
        json!({
            "accountIndex": index,
            "amount": amount,
            "metadata": { "reason": "participation" },
            "windowIndex": index,
            "proof": ["0x01", "0x02"]
        })
    };
    let months = vec![
        MonthDirectory::new(
            "2021-01",
            vec![
                TreeFile::text(
                    "merkle-tree.json",
                    single_file(json!({ "0xAAA": claim(0, "1"), "0xBBB": claim(1, "2") })),
                ),
                TreeFile::text("summary.csv", "address,amount"),
            ],
        ),
        MonthDirectory::new(
            "2021-02",
            vec![TreeFile::text(
                "merkle-tree.json",
                single_file(json!({ "0xAAA": claim(0, "340282366920938463463374607431768211456") })),
            )],
        ),
        MonthDirectory::new("2021-03", vec![TreeFile::text("notes.md", "skipped")]),
    ];
    let pipeline = RegroupPipeline::new(
        MockTreeSource::new(months),
        MockGitWriter::with_branch("main"),
        config(),
    );

    let report = pipeline.run(SchemaVariant::Single).await.unwrap();
    assert_eq!(report.stats.months, 2);
    assert_eq!(report.stats.recipients, 2);
    assert_eq!(report.stats.claims, 3);

    let users = published(&pipeline, &report.receipt.blob_sha);
    assert_eq!(users["0xAAA"].as_object().unwrap().len(), 2);
    assert_eq!(
        users["0xAAA"]["2021-02"]["amount"],
        "340282366920938463463374607431768211456"
    );
    assert_eq!(users["0xBBB"]["2021-01"]["proof"], json!(["0x01", "0x02"]));
    assert!(users["0xBBB"].get("2021-02").is_none());
}

#[tokio::test]
async fn test_output_is_two_space_indented() {
    let months = vec![MonthDirectory::new(
        "2021-01",
        vec![TreeFile::text(
            "merkle-tree.json",
            single_file(json!({
                "0xAAA": {
                    "accountIndex": 0,
                    "amount": "1",
                    "metadata": { "reason": "x" },
                    "windowIndex": 0,
                    "proof": []
                }
            })),
        )],
    )];
    let pipeline = RegroupPipeline::new(
        MockTreeSource::new(months),
        MockGitWriter::with_branch("main"),
        config(),
    );

    let report = pipeline.run(SchemaVariant::Single).await.unwrap();
    let text = pipeline.writer().blob(&report.receipt.blob_sha).unwrap();
    assert!(text.starts_with("{\n  \"0xAAA\": {\n    \"2021-01\": {"));
}

// ============ Dual Schema ============

#[tokio::test]
async fn test_dual_recipient_in_both_token_files() {
    let months = vec![MonthDirectory::new(
        "2023-01",
        vec![
            TreeFile::text(
                "merkle-tree-veAUXO.json",
                dual_file(json!({ "0xAAA": dual_claim(0, "90", "100", "10") })),
            ),
            TreeFile::text(
                "merkle-tree-xAUXO.json",
                dual_file(json!({
                    "0xAAA": dual_claim(4, "45", "50", "5"),
                    "0xCCC": dual_claim(5, "1", "1", "0")
                })),
            ),
        ],
    )];
    let pipeline = RegroupPipeline::new(
        MockTreeSource::new(months),
        MockGitWriter::with_branch("main"),
        config(),
    );

    let report = pipeline.run(SchemaVariant::Dual).await.unwrap();
    assert_eq!(report.receipt.path, "reports/users-by-token.json");
    assert_eq!(report.stats.files, 2);
    assert_eq!(report.stats.claims, 3);

    let users = published(&pipeline, &report.receipt.blob_sha);
    let ve = &users["0xAAA"]["veAUXO"]["2023-01"];
    let x = &users["0xAAA"]["xAUXO"]["2023-01"];
    assert_eq!(ve["amount"], "90");
    assert_eq!(ve["rewards"]["tax"], "10");
    assert_eq!(x["amount"], "45");
    assert_eq!(x["accountIndex"], 4);
    assert_ne!(ve, x);

    assert!(users["0xCCC"].get("veAUXO").is_none());
    assert_eq!(users["0xCCC"]["xAUXO"]["2023-01"]["amount"], "1");
}

#[tokio::test]
async fn test_dual_flat_breakdown_and_fractional_amounts() {
    let flat = json!({
        "accountIndex": 0,
        "amount": "10.5",
        "proRata": "8",
        "redistributed": "1.5",
        "tax": "1",
        "windowIndex": 3,
        "proof": ["0x00"]
    });
    let months = vec![MonthDirectory::new(
        "2023-01",
        vec![TreeFile::text(
            "merkle-tree-xAUXO.json",
            dual_file(json!({ "0xAAA": flat.clone() })),
        )],
    )];
    let pipeline = RegroupPipeline::new(
        MockTreeSource::new(months),
        MockGitWriter::with_branch("main"),
        config(),
    );

    let report = pipeline.run(SchemaVariant::Dual).await.unwrap();

    let users = published(&pipeline, &report.receipt.blob_sha);
    assert_eq!(users["0xAAA"]["xAUXO"]["2023-01"], flat);
    assert_eq!(pipeline.writer().calls().len(), 5);
}

// ============ Publish Failures ============

#[tokio::test]
async fn test_missing_branch_aborts_before_objects() {
    let pipeline = RegroupPipeline::new(
        MockTreeSource::default(),
        MockGitWriter::with_branch("main"),
        RunConfig::new(RepoCoordinate::new("AuxoDAO", "rewards"), "does-not-exist"),
    );

    let err = pipeline.run(SchemaVariant::Single).await.unwrap_err();
    assert!(matches!(err, BridgeError::BranchNotFound { .. }));
    assert_eq!(pipeline.writer().calls(), vec![GitStep::GetRef]);
    assert_eq!(pipeline.writer().object_count(), 0);
}

#[tokio::test]
async fn test_commit_message_and_parent() {
    let writer = MockGitWriter::with_branch("main");
    let before = writer.branch_head("main").unwrap();
    let pipeline = RegroupPipeline::new(MockTreeSource::default(), writer, config());

    let report = pipeline.run(SchemaVariant::Single).await.unwrap();
    let commit = pipeline.writer().commit(&report.receipt.commit_sha).unwrap();

    assert_eq!(commit.message, COMMIT_MESSAGE);
    assert_eq!(commit.parents, vec![before]);
    assert_eq!(
        pipeline.writer().branch_head("main"),
        Some(report.receipt.commit_sha)
    );
}

/// Writer whose branch is moved by someone else right after the commit is created
struct RacingWriter {
    inner: MockGitWriter,
}

#[async_trait]
impl GitWriter for RacingWriter {
    async fn get_branch_tip(&self, branch: &str) -> BridgeResult<BranchTip> {
        self.inner.get_branch_tip(branch).await
    }

    async fn create_blob(&self, content: &str) -> BridgeResult<String> {
        self.inner.create_blob(content).await
    }

    async fn create_tree(&self, base_tree: &str, entries: &[TreeEntry]) -> BridgeResult<String> {
        self.inner.create_tree(base_tree, entries).await
    }

    async fn create_commit(
        &self,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> BridgeResult<String> {
        let sha = self.inner.create_commit(message, tree, parents).await?;
        self.inner.advance_branch("main");
        Ok(sha)
    }

    async fn update_ref(&self, branch: &str, sha: &str) -> BridgeResult<()> {
        self.inner.update_ref(branch, sha).await
    }
}

#[tokio::test]
async fn test_concurrent_branch_update_fails_loudly() {
    let writer = RacingWriter {
        inner: MockGitWriter::with_branch("main"),
    };
    let pipeline = RegroupPipeline::new(MockTreeSource::default(), writer, config());

    let err = pipeline.run(SchemaVariant::Single).await.unwrap_err();
    assert!(matches!(err, BridgeError::Api { status: 422, .. }));

    let calls = pipeline.writer().inner.calls();
    assert_eq!(calls.iter().filter(|s| **s == GitStep::GetRef).count(), 1);
}

// ============ Local Source ============

#[tokio::test]
async fn test_local_source_pipeline() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let month = temp_dir.path().join("reports/2022-12");
    std::fs::create_dir_all(&month).unwrap();
    std::fs::write(
        month.join("merkle-tree-xAUXO.json"),
        dual_file(json!({ "0xDDD": dual_claim(0, "7", "7", "0") })),
    )
    .unwrap();

    let pipeline = RegroupPipeline::new(
        LocalTreeSource::new(temp_dir.path()),
        MockGitWriter::with_branch("main"),
        config(),
    );

    let report = pipeline.run(SchemaVariant::Dual).await.unwrap();
    let text = pipeline.writer().blob(&report.receipt.blob_sha).unwrap();
    let users: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(users["0xDDD"]["xAUXO"]["2022-12"]["amount"], "7");
}
