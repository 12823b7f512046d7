use std::collections::HashMap;

use embedded_hal::delay::DelayNs;

use crate::{
    dcs,
    interface::Interface,
    models::ST7735S,
    Builder, Display, NoResetPin,
};

pub type TestDisplay = Display<MockDisplayInterface, ST7735S, NoResetPin>;

/// Builds a display with default options and forgets the init traffic.
pub fn display() -> TestDisplay {
    let mut display = Builder::new(ST7735S, MockDisplayInterface::new())
        .init(&mut MockDelay::default())
        .unwrap();
    display.di.events.clear();
    display
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Select,
    Deselect,
    Command(u8),
    Data(u8),
    Block { data: Vec<u8>, repeat: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

#[derive(Debug, Default)]
pub struct MockDisplayInterface {
    pub events: Vec<Event>,
    /// Makes every block transfer fail after it is recorded.
    pub fail_blocks: bool,
    /// Makes every command fail after it is recorded.
    pub fail_commands: bool,
}

impl MockDisplayInterface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Interface for MockDisplayInterface {
    type Error = MockError;

    fn select(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::Select);
        Ok(())
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::Deselect);
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.events.push(Event::Command(command));
        if self.fail_commands {
            return Err(MockError);
        }
        Ok(())
    }

    fn send_data8(&mut self, data: u8) -> Result<(), Self::Error> {
        self.events.push(Event::Data(data));
        Ok(())
    }

    fn send_block(&mut self, data: &[u8], repeat: u16) -> Result<(), Self::Error> {
        if !data.is_empty() && repeat > 0 {
            self.events.push(Event::Block {
                data: data.to_vec(),
                repeat,
            });
        }
        if self.fail_blocks {
            return Err(MockError);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.total_ns += u64::from(us) * 1_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

/// Decodes the address windows, as `(x0, y0, x1, y1)`, in the order they
/// were set.
pub fn windows(events: &[Event]) -> Vec<(u16, u16, u16, u16)> {
    let mut decoder = WindowDecoder::default();
    let mut out = Vec::new();
    for event in events {
        if let Some(window) = decoder.feed(event) {
            out.push(window);
        }
    }
    out
}

#[derive(Default)]
struct WindowDecoder {
    command: u8,
    params: Vec<u8>,
    columns: (u16, u16),
}

impl WindowDecoder {
    /// Returns the full window once its row range is complete.
    fn feed(&mut self, event: &Event) -> Option<(u16, u16, u16, u16)> {
        match *event {
            Event::Command(c) => {
                self.command = c;
                self.params.clear();
                None
            }
            Event::Data(b) if self.command == dcs::CASET || self.command == dcs::RASET => {
                self.params.push(b);
                if self.params.len() != 4 {
                    return None;
                }
                let p = &self.params;
                let range = (
                    u16::from_be_bytes([p[0], p[1]]),
                    u16::from_be_bytes([p[2], p[3]]),
                );
                if self.command == dcs::CASET {
                    self.columns = range;
                    None
                } else {
                    Some((self.columns.0, range.0, self.columns.1, range.1))
                }
            }
            _ => None,
        }
    }
}

/// Panel RAM as seen through the recorded traffic.
#[derive(Debug, Default)]
pub struct PanelSim {
    /// Written pixels by panel coordinate.
    pub pixels: HashMap<(u16, u16), u16>,
}

impl PanelSim {
    pub fn replay(events: &[Event]) -> Self {
        let mut sim = Self::default();
        let mut decoder = WindowDecoder::default();
        let mut window = (0, 0, 0, 0);
        let mut cursor = (0, 0);
        let mut writing = false;
        let mut high: Option<u8> = None;

        let mut push = |byte: u8, cursor: &mut (u16, u16), window: (u16, u16, u16, u16)| {
            let Some(hi) = high.take() else {
                high = Some(byte);
                return;
            };
            sim.pixels.insert(*cursor, u16::from_be_bytes([hi, byte]));
            let (x0, y0, x1, y1) = window;
            cursor.0 += 1;
            if cursor.0 > x1 {
                cursor.0 = x0;
                cursor.1 += 1;
                if cursor.1 > y1 {
                    cursor.1 = y0;
                }
            }
        };

        for event in events {
            if let Some(w) = decoder.feed(event) {
                window = w;
            }
            match event {
                Event::Command(c) => {
                    writing = *c == dcs::RAMWR;
                    cursor = (window.0, window.1);
                }
                Event::Data(b) if writing => push(*b, &mut cursor, window),
                Event::Block { data, repeat } if writing => {
                    for _ in 0..*repeat {
                        for &b in data {
                            push(b, &mut cursor, window);
                        }
                    }
                }
                _ => {}
            }
        }
        drop(push);
        sim
    }
}
