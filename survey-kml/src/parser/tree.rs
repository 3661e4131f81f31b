//! Arbre KML possédé, indépendant du buffer source

/// Élément du document : nom local, texte propre, enfants ordonnés
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    text: Option<String>,
    children: Vec<Node>,
}

impl Node {
    #[cfg(test)]
    pub(crate) fn new(name: impl Into<String>, text: Option<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            text,
            children,
        }
    }

    /// Nom local (sans préfixe de namespace)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Texte (ou CDATA) direct de l'élément, trimé ; `None` si vide
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Premier enfant portant ce nom
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Texte du premier enfant portant ce nom
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Node::text)
    }

    /// Descend un chemin de noms, en prenant à chaque niveau le premier enfant
    pub fn find_path(&self, path: &[&str]) -> Option<&Node> {
        match path.split_first() {
            None => Some(self),
            Some((head, rest)) => self.child(head)?.find_path(rest),
        }
    }

    /// Construit un `Node` possédé depuis un élément roxmltree
    ///
    /// Contenu mixte (texte + balises inline, ex. une description HTML non
    /// CDATA) : le texte est la source brute entre le premier et le
    /// dernier nœud enfant, balises comprises.
    pub(crate) fn from_xml(node: roxmltree::Node<'_, '_>) -> Self {
        let mut text = String::new();
        let mut children = Vec::new();

        for child in node.children() {
            if child.is_element() {
                children.push(Node::from_xml(child));
            } else if child.is_text() {
                if let Some(t) = child.text() {
                    text.push_str(t);
                }
            }
        }

        let mixed = !children.is_empty() && !text.trim().is_empty();
        let text = match mixed.then(|| inner_source(node)).flatten() {
            Some(raw) => raw,
            None => text,
        };

        let text = text.trim();
        Self {
            name: node.tag_name().name().to_string(),
            text: (!text.is_empty()).then(|| text.to_string()),
            children,
        }
    }
}

/// Source brute du contenu d'un élément
fn inner_source(node: roxmltree::Node<'_, '_>) -> Option<String> {
    let start = node.first_child()?.range().start;
    let end = node.last_child()?.range().end;
    node.document()
        .input_text()
        .get(start..end)
        .map(str::to_string)
}

/// Export KML parsé : l'élément `Document` sous la racine `kml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    feature: Node,
}

impl Document {
    pub(crate) fn new(feature: Node) -> Self {
        Self { feature }
    }

    /// Nom du `Document` (numéro de parcelle)
    pub fn name(&self) -> Option<&str> {
        self.feature.child_text("name")
    }

    /// Premier `Placemark` directement sous `Document`
    pub fn top_placemark(&self) -> Option<&Node> {
        self.feature.child("Placemark")
    }

    /// Premier `Placemark` du premier `Folder`
    ///
    /// Seule la première occurrence est consultée, même si le document
    /// contient plusieurs dossiers ou placemarks.
    pub fn folder_placemark(&self) -> Option<&Node> {
        self.feature.find_path(&["Folder", "Placemark"])
    }
}
