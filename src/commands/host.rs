use std::io::Write;

/// Abstract the host environment to enable testing
pub trait Host: Send + Sync {
    // where to send normal output (e.g., stdout)
    fn output(&mut self) -> impl Write;

    // where to send error output (e.g., stderr)
    fn error(&mut self) -> impl Write;

    /// Read one line of user input into `buf`, returning the number of bytes read (0 at end of input).
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize>;

    /// Terminate the process (although in a test environment this might just set a flag and return).
    fn exit(&mut self, code: i32);
}

/// Test host that captures output to in-memory buffers and replays scripted input
#[cfg(test)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub input: std::collections::VecDeque<String>,
}

#[cfg(test)]
impl TestHost {
    pub fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
            input: std::collections::VecDeque::new(),
        }
    }

    pub fn with_input(lines: &[&str]) -> Self {
        Self {
            input: lines.iter().map(|line| format!("{line}\n")).collect(),
            ..Self::new()
        }
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        Ok(self.input.pop_front().map_or(0, |line| {
            buf.push_str(&line);
            line.len()
        }))
    }

    fn exit(&mut self, _code: i32) {
        // In tests, don't actually exit
    }
}
