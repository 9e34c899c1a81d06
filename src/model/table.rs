//! The AlexNet stage table and sample predictions.

use super::predictions::{Prediction, SamplePredictions};
use super::stage::{Archetype, StageDescriptor, VisualConfig};
use crate::surface::Color;

const INPUT_BLUE: Color = Color::hex(0x3b82f6);
const CONV_GREEN: Color = Color::hex(0x10b981);
const POOL_AMBER: Color = Color::hex(0xf59e0b);
const FC_VIOLET: Color = Color::hex(0x8b5cf6);
const OUTPUT_PINK: Color = Color::hex(0xec4899);

/// The nine stages, in walkthrough order.
pub static ALEXNET_STAGES: [StageDescriptor; 9] = [
    StageDescriptor {
        id: 1,
        name: "Input Preprocessing",
        short_name: "Input",
        description: "The input image is preprocessed by resizing it to 224×224 pixels with three \
color channels (RGB), creating a tensor of shape 224×224×3. Pixel values are normalized by \
subtracting the mean RGB values from the ImageNet dataset to standardize the input. This ensures \
consistency across different images and helps the network learn more effectively.",
        input_shape: "Variable",
        output_shape: "224×224×3",
        specs: &[
            "Input dimensions: 224 × 224 × 3",
            "Normalization: Mean subtraction",
            "Color space: RGB",
            "Data type: Float32",
            "Value range: Normalized [-1, 1]",
        ],
        operation: "Resize & Normalize",
        parameters: 0,
        formula: Some("x' = (x - μ) / σ"),
        formula_explanation: Some(
            "where x is the original pixel value, μ is the mean, and σ is standard deviation",
        ),
        why_it_works: Some(
            "Normalization ensures all input values are on a similar scale, which helps the \
network learn faster and more reliably. Without normalization, features with larger value ranges \
could dominate the learning process.",
        ),
        what_it_learns: Some(
            "This stage doesn't learn anything - it's pure data preprocessing to standardize \
inputs for consistent processing.",
        ),
        visual: VisualConfig {
            archetype: Archetype::Input {
                width: 224,
                height: 224,
                depth: 3,
            },
            color: INPUT_BLUE,
        },
    },
    StageDescriptor {
        id: 2,
        name: "First Convolutional Layer",
        short_name: "Conv1 + ReLU",
        description: "The first convolutional layer applies 96 filters of size 11×11×3 with a \
stride of 4 pixels. Each filter slides across the input image, detecting low-level features such \
as edges, corners, and color gradients. The ReLU activation function is then applied \
element-wise, introducing non-linearity by setting all negative values to zero. The output is a \
feature map of size 55×55×96.",
        input_shape: "224×224×3",
        output_shape: "55×55×96",
        specs: &[
            "Number of filters: 96",
            "Kernel size: 11 × 11 × 3",
            "Stride: 4 pixels",
            "Padding: Valid (no padding)",
            "Activation: ReLU",
            "Parameters: ~35K (34,944)",
        ],
        operation: "Convolution + ReLU",
        parameters: 34_944,
        formula: Some("Y[i,j,k] = ReLU(Σ(X * W[k]) + b[k])"),
        formula_explanation: Some(
            "where X is input, W[k] is the k-th filter, * denotes convolution, b is bias, and \
ReLU(x) = max(0, x)",
        ),
        why_it_works: Some(
            "Convolution allows the network to detect local patterns (edges, corners) regardless \
of where they appear in the image. The large 11×11 filter can capture broad features, while the \
stride of 4 reduces computation. ReLU adds non-linearity, enabling the network to learn complex \
patterns.",
        ),
        what_it_learns: Some(
            "Edge detectors, color gradients, and simple textures. Example filters: horizontal \
edges, vertical edges, diagonal lines, color transitions (red-to-blue, etc.)",
        ),
        visual: VisualConfig {
            archetype: Archetype::Conv {
                width: 55,
                height: 55,
                depth: 96,
            },
            color: CONV_GREEN,
        },
    },
    StageDescriptor {
        id: 3,
        name: "First Pooling Layer",
        short_name: "Pool1 + LRN",
        description: "Max pooling with a 3×3 window and stride of 2 is applied, selecting the \
maximum value within each window. This reduces the spatial dimensions from 55×55×96 to 27×27×96, \
providing translation invariance and reducing computational load. Local Response Normalization \
(LRN) is also applied to normalize activations across neighboring feature maps.",
        input_shape: "55×55×96",
        output_shape: "27×27×96",
        specs: &[
            "Pool type: Max pooling",
            "Pool size: 3 × 3",
            "Stride: 2 pixels",
            "Normalization: LRN",
            "Dimension reduction: ~75%",
            "Parameters: 0 (non-learnable)",
        ],
        operation: "Max Pooling + LRN",
        parameters: 0,
        formula: Some("Y[i,j,k] = max(X[i*s:i*s+p, j*s:j*s+p, k])"),
        formula_explanation: Some(
            "where s=stride (2), p=pool size (3). Selects maximum value from each 3×3 window.",
        ),
        why_it_works: Some(
            "Max pooling retains the strongest activations (most important features) while \
making the representation smaller and more manageable. It provides translation invariance - the \
network can recognize features even if they move slightly in the image.",
        ),
        what_it_learns: Some(
            "No learning occurs - this is a fixed downsampling operation that preserves the most \
prominent features while reducing dimensionality by 75%.",
        ),
        visual: VisualConfig {
            archetype: Archetype::Pool {
                width: 27,
                height: 27,
                depth: 96,
            },
            color: POOL_AMBER,
        },
    },
    StageDescriptor {
        id: 4,
        name: "Second Convolutional Layer",
        short_name: "Conv2 + ReLU",
        description: "The second convolutional layer uses 256 filters of size 5×5×96 with padding \
to maintain spatial dimensions at 27×27. These filters detect mid-level features by combining the \
low-level features from the previous layer. Each filter learns to recognize specific combinations \
of edges and textures, such as object parts. ReLU activation is applied after convolution, \
producing 27×27×256 feature maps.",
        input_shape: "27×27×96",
        output_shape: "27×27×256",
        specs: &[
            "Number of filters: 256",
            "Kernel size: 5 × 5 × 96",
            "Stride: 1 pixel",
            "Padding: Same (2 pixels)",
            "Activation: ReLU",
            "Parameters: ~614K (614,656)",
        ],
        operation: "Convolution + ReLU",
        parameters: 614_656,
        formula: Some("Y[i,j,k] = ReLU(Σ(F[i,j] * W[k]) + b[k])"),
        formula_explanation: Some(
            "where F is feature maps from Conv1, W[k] is the k-th 5×5×96 filter combining 96 \
previous feature maps",
        ),
        why_it_works: Some(
            "Smaller 5×5 filters operating on already-processed features can detect more complex \
patterns by combining multiple simple features. Padding maintains spatial dimensions, preserving \
spatial information for deeper layers.",
        ),
        what_it_learns: Some(
            "Mid-level patterns: textures (fur, fabric), simple shapes (circles, rectangles), \
repeated patterns. Combines edges into more meaningful structures like corners of objects or \
surface textures.",
        ),
        visual: VisualConfig {
            archetype: Archetype::Conv {
                width: 27,
                height: 27,
                depth: 256,
            },
            color: CONV_GREEN,
        },
    },
    StageDescriptor {
        id: 5,
        name: "Deep Convolutional Layers",
        short_name: "Conv3-5 + ReLU",
        description: "Three consecutive convolutional layers extract high-level features. Conv3 \
applies 384 filters (3×3×256), Conv4 uses 384 filters (3×3×384), and Conv5 employs 256 filters \
(3×3×384). These layers use smaller 3×3 kernels with padding to maintain spatial dimensions. Each \
layer is followed by ReLU activation. These deep layers enable recognition of complex, abstract \
features such as object parts and semantic patterns.",
        input_shape: "27×27×256",
        output_shape: "13×13×256",
        specs: &[
            "Conv3: 384 filters, 3×3×256, ReLU",
            "Conv4: 384 filters, 3×3×384, ReLU",
            "Conv5: 256 filters, 3×3×384, ReLU",
            "Total parameters: ~1.3M",
            "Output after pool: 13×13×256",
            "Receptive field: Large (covers significant input area)",
        ],
        operation: "3× Convolution + ReLU",
        parameters: 1_327_488,
        formula: Some("Y = ReLU(Conv5(ReLU(Conv4(ReLU(Conv3(X))))))"),
        formula_explanation: Some(
            "Three stacked convolutions, each followed by ReLU. Small 3×3 filters build up large \
receptive fields.",
        ),
        why_it_works: Some(
            "Stacking multiple small (3×3) convolutional layers is more efficient than using one \
large filter. Each neuron in these deep layers can 'see' a large portion of the original image, \
allowing detection of complex, high-level patterns.",
        ),
        what_it_learns: Some(
            "Object parts and complex structures: eyes, noses, wheels, windows, fur patterns, \
specific textures. These layers begin to recognize object-specific features rather than generic \
patterns.",
        ),
        visual: VisualConfig {
            archetype: Archetype::Conv {
                width: 13,
                height: 13,
                depth: 256,
            },
            color: CONV_GREEN,
        },
    },
    StageDescriptor {
        id: 6,
        name: "Final Pooling Layer",
        short_name: "Pool3",
        description: "The final max pooling operation uses a 3×3 window with stride 2, \
compressing the spatial dimensions from 13×13×256 to 6×6×256. This results in 9,216 values \
(6×6×256) that capture the essential high-level features needed for classification. The pooling \
provides spatial invariance, allowing the network to recognize objects regardless of their \
precise location in the image.",
        input_shape: "13×13×256",
        output_shape: "6×6×256",
        specs: &[
            "Pool type: Max pooling",
            "Pool size: 3 × 3",
            "Stride: 2 pixels",
            "Output flattened size: 9,216",
            "Spatial compression: ~75%",
            "Parameters: 0 (non-learnable)",
        ],
        operation: "Max Pooling",
        parameters: 0,
        formula: Some("Y = flatten(maxpool(X)); Output shape: 9,216"),
        formula_explanation: Some(
            "Final pooling reduces 13×13×256 to 6×6×256, then flattened to a 1D vector of 9,216 \
values",
        ),
        why_it_works: Some(
            "This final compression creates a compact, robust representation of all detected \
features. Spatial information is largely discarded - only 'what' features are present matters, \
not 'where' they are (translation invariance).",
        ),
        what_it_learns: Some(
            "No learning - fixed operation that prepares the spatial feature maps for the fully \
connected layers by creating a fixed-size feature vector.",
        ),
        visual: VisualConfig {
            archetype: Archetype::Pool {
                width: 6,
                height: 6,
                depth: 256,
            },
            color: POOL_AMBER,
        },
    },
    StageDescriptor {
        id: 7,
        name: "Fully Connected Layers",
        short_name: "FC6-7 + Dropout",
        description: "The 6×6×256 feature maps are flattened into a vector of 9,216 values. This \
vector passes through two fully connected layers, each with 4,096 neurons. Each neuron computes a \
weighted sum of all input values followed by ReLU activation. Dropout with probability 0.5 is \
applied after each layer during training to prevent overfitting. These layers perform high-level \
reasoning by learning complex combinations of features.",
        input_shape: "9,216 (flattened)",
        output_shape: "4,096",
        specs: &[
            "FC6: 9,216 → 4,096 neurons",
            "FC7: 4,096 → 4,096 neurons",
            "Activation: ReLU",
            "Dropout rate: 0.5 (training only)",
            "Total parameters: ~54.5M",
            "Operation: Matrix multiplication + bias",
        ],
        operation: "Fully Connected + ReLU",
        parameters: 54_525_952,
        formula: Some("Y = ReLU(W·X + b); W is 4096×9216 matrix"),
        formula_explanation: Some(
            "Dense layers: every output neuron connected to every input. Y[i] = ReLU(Σ(W[i,j] * \
X[j]) + b[i])",
        ),
        why_it_works: Some(
            "Fully connected layers integrate all the spatial features detected by convolutional \
layers. They learn to combine different patterns to recognize complete objects. Each neuron can \
specialize in detecting specific object types based on feature combinations.",
        ),
        what_it_learns: Some(
            "High-level semantic concepts: combinations of features that indicate specific \
objects. For example, 'fur + whiskers + pointed ears = cat' or 'wheels + windows + metallic \
texture = car'. These are abstract, global representations.",
        ),
        visual: VisualConfig {
            archetype: Archetype::FullyConnected { neurons: 4096 },
            color: FC_VIOLET,
        },
    },
    StageDescriptor {
        id: 8,
        name: "Classification Layer",
        short_name: "FC8",
        description: "The final fully connected layer contains 1,000 neurons, one for each class \
in the ImageNet dataset. Each neuron computes a weighted sum of the 4,096 input features, \
producing a raw score (logit) that indicates the network's confidence for that class. Higher \
scores indicate stronger evidence that the input image belongs to that category. No activation \
function is applied at this stage.",
        input_shape: "4,096",
        output_shape: "1,000",
        specs: &[
            "Output neurons: 1,000 (ImageNet classes)",
            "Operation: Linear transformation",
            "Parameters: ~4.1M (4,097,000)",
            "Output: Raw class scores (logits)",
            "No activation function",
            "Classes: ImageNet 1000 categories",
        ],
        operation: "Fully Connected (Linear)",
        parameters: 4_097_000,
        formula: Some("logits = W·X + b; W is 1000×4096 matrix"),
        formula_explanation: Some(
            "Linear layer producing raw scores (logits) for each of 1000 classes. logits[i] = \
Σ(W[i,j] * X[j]) + b[i]",
        ),
        why_it_works: Some(
            "Each of the 1,000 neurons learns weights that respond strongly to the feature \
combinations characteristic of its specific class. Higher logit values indicate stronger evidence \
for that class.",
        ),
        what_it_learns: Some(
            "Class-specific decision boundaries. Each neuron learns: 'If these specific features \
are present with these strengths, the image likely belongs to my class.' For example, the 'golden \
retriever' neuron learns to fire strongly when dog features are present.",
        ),
        visual: VisualConfig {
            archetype: Archetype::FullyConnected { neurons: 1000 },
            color: FC_VIOLET,
        },
    },
    StageDescriptor {
        id: 9,
        name: "Softmax Output",
        short_name: "Softmax",
        description: "The softmax function transforms the 1,000 raw scores into a probability \
distribution. Each score is exponentiated and divided by the sum of all exponentiated scores, \
ensuring all outputs are positive and sum to 1.0. The class with the highest probability is \
selected as the predicted label. This provides both a classification decision and a confidence \
measure. For example: 'tabby cat' (73%), 'Egyptian cat' (15%), others (12%).",
        input_shape: "1,000",
        output_shape: "1,000 probabilities",
        specs: &[
            "Function: Softmax normalization",
            "Output: Probability distribution",
            "Sum of outputs: 1.0 (100%)",
            "Parameters: 0 (non-learnable)",
            "Selection: argmax(probabilities)",
            "Top-5 accuracy: ~83% (AlexNet on ImageNet)",
        ],
        operation: "Softmax",
        parameters: 0,
        formula: Some("P[i] = exp(logits[i]) / Σ(exp(logits[j]))"),
        formula_explanation: Some(
            "Converts logits to probabilities. Exponentiation amplifies differences; \
normalization ensures Σ P[i] = 1.0",
        ),
        why_it_works: Some(
            "Softmax converts arbitrary scores into interpretable probabilities that sum to 100%. \
Large score differences become even larger after exponentiation, making the network's top choice \
very confident. The probabilistic output allows applications to make informed decisions based on \
confidence levels.",
        ),
        what_it_learns: Some(
            "No learning - fixed mathematical transformation. Takes raw scores and produces a \
proper probability distribution where competing classes 'compete' and the strongest wins while \
weaker alternatives still get some probability mass.",
        ),
        visual: VisualConfig {
            archetype: Archetype::Output { bars: 10 },
            color: OUTPUT_PINK,
        },
    },
];

const fn p(label: &'static str, probability: f64) -> Prediction {
    Prediction { label, probability }
}

/// Illustrative top-10 predictions for each sample image.
pub static SAMPLE_PREDICTIONS: [SamplePredictions; 3] = [
    SamplePredictions {
        key: "cat",
        predictions: &[
            p("Tabby Cat", 0.73),
            p("Egyptian Cat", 0.15),
            p("Tiger Cat", 0.08),
            p("Persian Cat", 0.02),
            p("Siamese Cat", 0.01),
            p("Lynx", 0.005),
            p("Leopard", 0.003),
            p("Jaguar", 0.002),
            p("Lion", 0.001),
            p("Tiger", 0.001),
        ],
    },
    SamplePredictions {
        key: "dog",
        predictions: &[
            p("Golden Retriever", 0.68),
            p("Labrador Retriever", 0.18),
            p("Cocker Spaniel", 0.07),
            p("Irish Setter", 0.04),
            p("Brittany Spaniel", 0.015),
            p("English Setter", 0.008),
            p("Border Collie", 0.005),
            p("Kelpie", 0.001),
            p("Australian Terrier", 0.0005),
            p("Welsh Springer", 0.0005),
        ],
    },
    SamplePredictions {
        key: "car",
        predictions: &[
            p("Sports Car", 0.65),
            p("Convertible", 0.20),
            p("Racer", 0.08),
            p("Coupe", 0.04),
            p("Sedan", 0.015),
            p("Beach Wagon", 0.008),
            p("Limousine", 0.005),
            p("Model T", 0.001),
            p("Go-kart", 0.0005),
            p("Grille", 0.0005),
        ],
    },
];
