/// Inclusive range of TCP ports, `begin <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    begin: u16,
    end: u16,
}

impl PortRange {
    /// Returns `None` when `begin > end`.
    pub fn new(begin: u16, end: u16) -> Option<Self> {
        (begin <= end).then_some(Self { begin, end })
    }

    pub fn single(port: u16) -> Self {
        Self {
            begin: port,
            end: port,
        }
    }

    pub fn begin(&self) -> u16 {
        self.begin
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    /// Number of ports in the range. Never zero.
    pub fn len(&self) -> usize {
        usize::from(self.end - self.begin) + 1
    }

    pub fn contains(&self, port: u16) -> bool {
        (self.begin..=self.end).contains(&port)
    }

    pub fn to_iter(&self) -> impl Iterator<Item = u16> + use<> {
        self.begin..=self.end
    }

    /// Splits the range into consecutive sub-ranges of at most `size` ports.
    ///
    /// The last batch may be shorter. A `size` of zero is treated as one and a
    /// `size` wider than the range yields the whole range as a single batch.
    pub fn batches(&self, size: usize) -> impl Iterator<Item = PortRange> + use<> {
        let size: usize = size.clamp(1, self.len());
        let begin: usize = usize::from(self.begin);
        let end: usize = usize::from(self.end);

        (begin..=end).step_by(size).map(move |start| {
            let stop: usize = (start + size - 1).min(end);
            // Both bounds lie within `self`, so they fit in u16.
            PortRange {
                begin: start as u16,
                end: stop as u16,
            }
        })
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
