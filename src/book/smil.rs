/// One synchronised text/audio pair of a media overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmilPar {
    pub id: Option<String>,
    pub text_src: String,
    pub audio_src: Option<String>,
    pub clip_begin: Option<String>,
    pub clip_end: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmilFile {
    pub href: String,
    pub id: Option<String>,
    pub pars: Vec<SmilPar>,
}

impl SmilFile {
    pub fn new(href: &str) -> Self {
        Self {
            href: href.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Smils {
    files: Vec<SmilFile>,
}

impl Smils {
    pub fn add(&mut self, file: SmilFile) {
        self.files.push(file);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn find_by_href(&self, href: &str) -> Option<&SmilFile> {
        self.files.iter().find(|file| file.href == href)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&SmilFile> {
        self.files
            .iter()
            .find(|file| file.id.as_deref() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_href_and_id() {
        let mut smils = Smils::default();
        let mut first = SmilFile::new("smil/ch1.smil");
        first.id = Some("ch1_overlay".to_string());
        first.pars.push(SmilPar {
            id: Some("p1".to_string()),
            text_src: "ch1.xhtml#s1".to_string(),
            audio_src: Some("audio/ch1.mp3".to_string()),
            clip_begin: Some("0:00:00.000".to_string()),
            clip_end: Some("0:00:02.500".to_string()),
        });
        smils.add(first);
        smils.add(SmilFile::new("smil/ch2.smil"));

        assert_eq!(smils.len(), 2);
        let found = smils.find_by_id("ch1_overlay").expect("smil by id");
        assert_eq!(found.href, "smil/ch1.smil");
        assert_eq!(found.pars[0].clip_end.as_deref(), Some("0:00:02.500"));
        assert!(smils.find_by_href("smil/ch2.smil").is_some());
        assert!(smils.find_by_href("smil/ch3.smil").is_none());
    }
}
