use log::info;

/// Track progress of reading record files within one run
pub struct ReadProgress {
    total: usize,
    files: usize,
    lines: usize,
}

impl ReadProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            files: 0,
            lines: 0,
        }
    }

    pub fn record_file(&mut self, accepted_lines: usize) {
        self.files += 1;
        self.lines += accepted_lines;
        self.log_progress();
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    fn log_progress(&self) {
        if should_log(self.files, self.total) {
            info!(
                "  → Read {}/{} files ({} record lines)",
                self.files, self.total, self.lines
            );
        }
    }
}

fn should_log(current: usize, total: usize) -> bool {
    is_milestone(current) || is_complete(current, total)
}

fn is_milestone(count: usize) -> bool {
    count % 10 == 0
}

fn is_complete(current: usize, total: usize) -> bool {
    current == total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_every_tenth_file_and_the_last() {
        assert!(!should_log(3, 25));
        assert!(should_log(10, 25));
        assert!(should_log(25, 25));
    }

    #[test]
    fn test_counts_accepted_lines() {
        let mut progress = ReadProgress::new(2);
        progress.record_file(4);
        progress.record_file(6);

        assert_eq!(progress.lines(), 10);
    }
}
