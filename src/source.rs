use std::fs::File;
use std::io;

/// Random-access read capability.
///
/// `read_at` fills `buf` starting at absolute offset `off` within the source
/// and returns how many bytes it placed there. It never moves any cursor the
/// source might have. `Ok(0)` means there is no data at `off`; a short read
/// is not an error.
pub trait ReadAt {
    fn read_at(&self, buf: &mut [u8], off: u64) -> io::Result<usize>;
}

impl ReadAt for [u8] {
    fn read_at(&self, buf: &mut [u8], off: u64) -> io::Result<usize> {
        if off >= self.len() as u64 {
            return Ok(0);
        }
        let rest = &self[off as usize..];
        let n = buf.len().min(rest.len());
        buf[..n].copy_from_slice(&rest[..n]);
        Ok(n)
    }
}

impl ReadAt for Vec<u8> {
    fn read_at(&self, buf: &mut [u8], off: u64) -> io::Result<usize> {
        self.as_slice().read_at(buf, off)
    }
}

#[cfg(unix)]
impl ReadAt for File {
    fn read_at(&self, buf: &mut [u8], off: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::read_at(self, buf, off)
    }
}

#[cfg(windows)]
impl ReadAt for File {
    fn read_at(&self, buf: &mut [u8], off: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_read(self, buf, off)
    }
}

impl<T: ReadAt + ?Sized> ReadAt for &T {
    fn read_at(&self, buf: &mut [u8], off: u64) -> io::Result<usize> {
        (**self).read_at(buf, off)
    }
}

impl<T: ReadAt + ?Sized> ReadAt for &mut T {
    fn read_at(&self, buf: &mut [u8], off: u64) -> io::Result<usize> {
        (**self).read_at(buf, off)
    }
}

impl<T: ReadAt + ?Sized> ReadAt for Box<T> {
    fn read_at(&self, buf: &mut [u8], off: u64) -> io::Result<usize> {
        (**self).read_at(buf, off)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn slice_read_at() {
        let data: &[u8] = b"Hello, World!";
        let mut buf = [0u8; 5];
        let n = data.read_at(&mut buf, 7).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&buf, b"World");
    }

    #[test]
    fn slice_read_at_short() {
        let data: &[u8] = b"Hello";
        let mut buf = [0u8; 8];
        let n = data.read_at(&mut buf, 3).unwrap();
        assert_eq!(n, 2);
        assert_eq!(&buf[..2], b"lo");
    }

    #[test]
    fn slice_read_at_past_end() {
        let data: &[u8] = b"Hello";
        let mut buf = [0u8; 4];
        assert_eq!(data.read_at(&mut buf, 5).unwrap(), 0);
        assert_eq!(data.read_at(&mut buf, 99).unwrap(), 0);
    }

    #[test]
    fn file_read_at() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Hello, World!").unwrap();
        file.flush().unwrap();

        let f = file.reopen().unwrap();
        let mut buf = [0u8; 5];
        let n = f.read_at(&mut buf, 7).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&buf, b"World");
    }
}
