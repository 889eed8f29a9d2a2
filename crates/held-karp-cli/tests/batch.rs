use std::fs;
use std::path::{Path, PathBuf};

use held_karp_cli::{run_batch, SolveOptions};
use held_karp_core::batch::{batch_file_name, batch_paths};
use held_karp_core::Error;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("held-karp-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(dir: &Path, index: usize, text: &str) {
    fs::write(dir.join(batch_file_name(index)), text).unwrap();
}

#[test]
fn missing_file_is_reported_and_skipped() {
    let dir = scratch_dir("batch-missing");
    write(&dir, 1, "2\n0 5\n7 0\n");
    write(&dir, 3, "3\n0 2 9\n1 0 6\n15 7 0\n");

    for jobs in [1, 3] {
        let items = run_batch(&batch_paths(&dir, 3), &SolveOptions::default(), jobs);
        assert_eq!(items.len(), 3);
        assert_eq!(
            items.iter().map(|item| item.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        assert_eq!(items[0].outcome.as_ref().unwrap().cost, 12);
        assert!(matches!(items[1].outcome, Err(Error::Io { .. })));
        assert_eq!(items[2].outcome.as_ref().unwrap().cost, 17);

        let record = items[1].to_record();
        assert!(record.report.is_none());
        assert!(record.error.unwrap().contains("matrix_2.txt"));
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn malformed_files_do_not_stop_the_batch() {
    let dir = scratch_dir("batch-malformed");
    write(&dir, 1, "30\n0 1\n1 0\n");
    write(&dir, 2, "3\n0 1 2\n3 0\n");
    write(&dir, 3, "2\n0 1\n1 0\n");

    let items = run_batch(&batch_paths(&dir, 3), &SolveOptions::default(), 2);
    assert!(matches!(items[0].outcome, Err(Error::Parse(_))));
    assert!(matches!(items[1].outcome, Err(Error::Parse(_))));
    assert_eq!(items[2].outcome.as_ref().unwrap().cost, 2);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn parallel_and_sequential_batches_agree() {
    let dir = scratch_dir("batch-parallel");
    for i in 1..=6 {
        let n = 3 + i;
        let mut text = format!("{n}\n");
        for row in 0..n {
            let line: Vec<String> = (0..n)
                .map(|col| {
                    if row == col {
                        0
                    } else {
                        (row * 7 + col * 13 + i) % 50 + 1
                    }
                })
                .map(|w| w.to_string())
                .collect();
            text.push_str(&line.join(" "));
            text.push('\n');
        }
        write(&dir, i, &text);
    }

    let paths = batch_paths(&dir, 6);
    let sequential = run_batch(&paths, &SolveOptions::default(), 1);
    let parallel = run_batch(&paths, &SolveOptions::default(), 4);
    for (a, b) in sequential.iter().zip(&parallel) {
        assert_eq!(a.index, b.index);
        assert_eq!(
            a.outcome.as_ref().unwrap().cost,
            b.outcome.as_ref().unwrap().cost
        );
    }

    fs::remove_dir_all(&dir).unwrap();
}
