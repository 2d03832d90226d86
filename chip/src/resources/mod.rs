use std::{fs, io, path::Path};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw program data, it is copied verbatim into memory
    /// stored as a u8 slice on the heap
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data
    pub fn new(name: &str, data: &[u8]) -> Self {
        Rom {
            name: name.to_string(),
            data: data.into(),
        }
    }

    /// Will read the rom from the given file, the file name is used as the rom name.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::debug!("read rom {} with {} bytes", name, data.len());

        Ok(Rom {
            name,
            data: data.into_boxed_slice(),
        })
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::Rom;
    use crate::opcode::{build_opcode, Opcode};

    const RAW_ROM_DATA: [Opcode; 3] = [0x00E0, 0x8120, 0x1000];

    #[test]
    fn test_rom_data() {
        let rom = Rom::new("TEST", &[0x00, 0xE0, 0x81, 0x20, 0x10, 0x00]);
        let data = rom.get_data();

        assert_eq!(rom.get_name(), "TEST");
        for i in (0..data.len()).step_by(2) {
            let output = build_opcode(data, i);
            assert_eq!(Ok(RAW_ROM_DATA[i / 2]), output);
        }
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join("chip8-interpreter-rom-test.ch8");
        std::fs::write(&path, [0x12, 0x00]).unwrap();

        let rom = Rom::from_file(&path).unwrap();
        assert_eq!(rom.get_name(), "chip8-interpreter-rom-test");
        assert_eq!(rom.get_data(), &[0x12u8, 0x00]);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_from_missing_file() {
        assert!(Rom::from_file("/this/rom/does/not/exist.ch8").is_err());
    }
}
