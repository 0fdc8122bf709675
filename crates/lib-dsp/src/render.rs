//! Human-readable and XML renderings of a signal.

use crate::signal::Signal;
use crate::storage::Backing;
use lib_sample::{type_label, Capacity, Complex, Sample};
use std::fmt;
use std::io::{self, Write};

impl<T: Sample, B: Backing<T>> fmt::Display for Signal<T, B> {
    /// Condensed summary: storage kind, length and element types.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.capacity() {
            Capacity::Dynamic => write!(f, "Signal Data is dynamically allocated: ")?,
            Capacity::Fixed(_) => write!(f, "Signal Data is statically allocated: ")?,
        }
        writeln!(f, "Supports {} samples.", self.size())?;
        writeln!(f, "Signal Datatype: {}", type_label::<T>())?;
        write!(f, "Fourier Datatype: {}", type_label::<Complex<T::Precision>>())
    }
}

impl<T: Sample, B: Backing<T>> Signal<T, B> {
    /// Write every sample with its time stamp as an XML document.
    ///
    /// ```text
    /// <?xml version="1.0"?>
    ///
    /// <Signal num_samples="2" sample_rate="2" type="real">
    ///     <Samples>
    ///         <Sample t="0.00000000"> 1.00000000 </Sample>
    ///         <Sample t="0.50000000"> 2.00000000 </Sample>
    ///     </Samples>
    /// </Signal>
    /// ```
    pub fn write_xml<W: Write>(&self, mut out: W) -> io::Result<()> {
        let kind = if T::IS_COMPLEX { "complex" } else { "real" };

        writeln!(out, "<?xml version=\"1.0\"?>")?;
        writeln!(out)?;
        writeln!(
            out,
            "<Signal num_samples=\"{}\" sample_rate=\"{}\" type=\"{}\">",
            self.size(),
            self.sample_rate(),
            kind
        )?;
        writeln!(out, "\t<Samples>")?;
        for (i, &sample) in self.iter().enumerate() {
            write!(out, "\t\t<Sample t=\"{:.8}\"> ", self.time_at(i))?;
            if T::IS_COMPLEX {
                write!(out, "{:.8},{:.8}", sample.re(), sample.im())?;
            } else {
                write!(out, "{:.8}", sample.re())?;
            }
            writeln!(out, " </Sample>")?;
        }
        writeln!(out, "\t</Samples>")?;
        writeln!(out, "</Signal>")?;
        Ok(())
    }

    /// [`write_xml`](Self::write_xml) into a string.
    pub fn to_xml(&self) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec can't fail.
        let _ = self.write_xml(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
